//! Interactive player session
//!
//! Reads commands from stdin and advances the simulated output on a
//! fixed clock. Everything except [`run`] is synchronous so the session
//! can be driven directly in tests.

use crate::headless::SimulatedOutput;
use crate::render;
use podcastr_core::Episode;
use podcastr_playback::{
    PlaybackConfig, PlaybackError, Player, PlayerEvent, Result, Transport,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

pub const HELP: &str = "\
Commands:
  play N      play episode N on its own
  list N      play the listing starting at episode N
  next        next episode
  prev        previous episode
  toggle      play / pause
  loop        toggle loop
  shuffle     toggle shuffle
  seek SECS   jump within the current episode
  clear       stop and empty the player
  status      show the player bar
  help        show this message
  quit        leave";

/// A parsed session command. Episode numbers are 1-based as listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(usize),
    List(usize),
    Next,
    Previous,
    Toggle,
    Loop,
    Shuffle,
    Seek(u64),
    Clear,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        let arg = words.next();

        if words.next().is_some() {
            return Err(format!("Too many arguments: {}", line.trim()));
        }

        let command = match (name.as_str(), arg) {
            ("play" | "p", Some(n)) => Command::Play(parse_number(n)?),
            ("list" | "l", Some(n)) => Command::List(parse_number(n)?),
            ("seek", Some(secs)) => Command::Seek(
                secs.parse()
                    .map_err(|_| format!("Not a number of seconds: {}", secs))?,
            ),
            ("play" | "p" | "list" | "l", None) => {
                return Err(format!("Usage: {} N", name));
            }
            ("seek", None) => return Err("Usage: seek SECS".to_string()),
            (_, Some(_)) => return Err(format!("{} takes no argument", name)),
            ("next" | "n", None) => Command::Next,
            ("prev" | "previous", None) => Command::Previous,
            ("toggle" | "t", None) => Command::Toggle,
            ("loop", None) => Command::Loop,
            ("shuffle", None) => Command::Shuffle,
            ("clear", None) => Command::Clear,
            ("status" | "s", None) => Command::Status,
            ("help" | "?", None) => Command::Help,
            ("quit" | "q" | "exit", None) => Command::Quit,
            _ => return Err(format!("Unknown command: {} (try help)", line.trim())),
        };

        Ok(command)
    }
}

fn parse_number(raw: &str) -> std::result::Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("Episode numbers start at 1, got {}", raw)),
    }
}

/// Whether the session should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    player: Player<SimulatedOutput>,
    episodes: Vec<Episode>,
    events: Rc<RefCell<Vec<PlayerEvent>>>,
}

impl Session {
    /// Session over a listing (the homepage, newest first)
    pub fn new(config: PlaybackConfig, episodes: Vec<Episode>) -> Self {
        let mut output = SimulatedOutput::new();
        output.register(&episodes);

        let mut player = Player::new(config, output);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        player.subscribe(move |_state, event| {
            sink.borrow_mut().push(event.clone());
        });

        Self {
            player,
            episodes,
            events,
        }
    }

    pub fn player(&self) -> &Player<SimulatedOutput> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player<SimulatedOutput> {
        &mut self.player
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Play an episode that may not be in the listing (detail page)
    pub fn play_episode(&mut self, episode: Episode) {
        self.player.output_mut().register([&episode]);
        self.player.play(episode);
        self.pump();
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!(?command, "Executing command");

        match command {
            Command::Play(n) => {
                let episode = self.episodes[self.index_of(n)?].clone();
                self.player.play(episode);
            }
            Command::List(n) => {
                let index = self.index_of(n)?;
                self.player.play_list(self.episodes.clone(), index)?;
            }
            Command::Next => self.player.play_next(),
            Command::Previous => self.player.play_previous(),
            Command::Toggle => self.player.toggle_play(),
            Command::Loop => self.player.toggle_loop(),
            Command::Shuffle => self.player.toggle_shuffle(),
            Command::Seek(secs) => self.player.seek(Duration::from_secs(secs))?,
            Command::Clear => self.player.clear_player_state(),
            Command::Status | Command::Help => {}
            Command::Quit => return Ok(Flow::Quit),
        }

        self.pump();
        Ok(Flow::Continue)
    }

    /// Advance the simulated clock
    pub fn tick(&mut self, elapsed: Duration) {
        self.player.output_mut().tick(elapsed);
        self.pump();
    }

    /// Events delivered since the last call
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn bar(&self) -> String {
        render::player_bar(self.player.state(), self.player.position())
    }

    /// 0-based index of listed episode number `n`
    fn index_of(&self, n: usize) -> Result<usize> {
        n.checked_sub(1)
            .filter(|&i| i < self.episodes.len())
            .ok_or(PlaybackError::InvalidIndex {
                index: n.saturating_sub(1),
                len: self.episodes.len(),
            })
    }

    /// Feed output signals back until the output goes quiet
    fn pump(&mut self) {
        loop {
            let signals = self.player.output_mut().drain_signals();
            if signals.is_empty() {
                break;
            }
            for signal in signals {
                self.player.handle_signal(signal);
            }
        }
    }
}

/// Run the session until `quit` or end of input
pub async fn run(mut session: Session, tick: Duration) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut clock = tokio::time::interval(tick);
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
    clock.tick().await;

    info!(episodes = session.episodes().len(), "Player session started");
    println!("{}", session.bar());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message);
                        continue;
                    }
                };

                if command == Command::Help {
                    println!("{}", HELP);
                    continue;
                }

                match session.execute(command) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => println!("{}", e),
                }
                report(&mut session, true);
            }
            _ = clock.tick() => {
                session.tick(tick);
                report(&mut session, false);
            }
        }
    }

    info!("Player session ended");
    Ok(())
}

/// Print errors, and the player bar when something other than the clock changed
fn report(session: &mut Session, always: bool) {
    let events = session.take_events();

    for event in &events {
        if let PlayerEvent::Error { message } = event {
            println!("Erro: {}", message);
        }
    }

    let changed = events
        .iter()
        .any(|e| !matches!(e, PlayerEvent::PositionUpdate { .. }));
    if always || changed {
        println!("{}", session.bar());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcastr_playback::SurfaceState;

    fn listing() -> Vec<Episode> {
        (1..=3)
            .map(|i| {
                Episode::new(
                    format!("ep-{}", i),
                    format!("Episode {}", i),
                    format!("https://cdn/ep-{}.mp3", i),
                    2,
                )
            })
            .collect()
    }

    fn session() -> Session {
        Session::new(PlaybackConfig::default(), listing())
    }

    fn current_id(session: &Session) -> Option<&str> {
        session.player().current_episode().map(|e| e.id.as_str())
    }

    // ===== Parsing =====

    #[test]
    fn parses_commands() {
        assert_eq!("play 2".parse::<Command>(), Ok(Command::Play(2)));
        assert_eq!("  LIST 1 ".parse::<Command>(), Ok(Command::List(1)));
        assert_eq!("seek 90".parse::<Command>(), Ok(Command::Seek(90)));
        assert_eq!("next".parse::<Command>(), Ok(Command::Next));
        assert_eq!("prev".parse::<Command>(), Ok(Command::Previous));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_commands() {
        assert!("play".parse::<Command>().is_err());
        assert!("play 0".parse::<Command>().is_err());
        assert!("play two".parse::<Command>().is_err());
        assert!("next 2".parse::<Command>().is_err());
        assert!("seek 1 2".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }

    // ===== Commands =====

    #[test]
    fn play_single_episode() {
        let mut session = session();

        session.execute(Command::Play(2)).unwrap();

        assert_eq!(current_id(&session), Some("ep-2"));
        assert_eq!(session.player().state().episode_list.len(), 1);
        assert_eq!(session.player().surface_state(), SurfaceState::LoadedPlaying);
        assert_eq!(
            session.player().output().loaded_url(),
            Some("https://cdn/ep-2.mp3")
        );
        assert!(!session.player().has_next());
    }

    #[test]
    fn out_of_range_number_changes_nothing() {
        let mut session = session();

        let err = session.execute(Command::Play(9)).unwrap_err();
        assert_eq!(err, PlaybackError::InvalidIndex { index: 8, len: 3 });

        let err = session.execute(Command::List(4)).unwrap_err();
        assert_eq!(err, PlaybackError::InvalidIndex { index: 3, len: 3 });

        assert!(session.player().state().is_empty());
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn list_then_navigate() {
        let mut session = session();

        session.execute(Command::List(1)).unwrap();
        session.execute(Command::Next).unwrap();
        assert_eq!(current_id(&session), Some("ep-2"));

        session.execute(Command::Previous).unwrap();
        assert_eq!(current_id(&session), Some("ep-1"));

        // At the start: no-op
        session.execute(Command::Previous).unwrap();
        assert_eq!(current_id(&session), Some("ep-1"));
    }

    #[test]
    fn toggle_pauses_output() {
        let mut session = session();
        session.execute(Command::List(1)).unwrap();

        session.execute(Command::Toggle).unwrap();

        assert!(!session.player().state().is_playing);
        assert!(!session.player().output().is_playing());
        assert_eq!(session.player().surface_state(), SurfaceState::LoadedPaused);
    }

    #[test]
    fn seek_moves_position() {
        let mut session = session();
        session.execute(Command::List(1)).unwrap();

        session.execute(Command::Seek(1)).unwrap();

        assert_eq!(session.player().position(), Duration::from_secs(1));
        assert!(session.execute(Command::Seek(60)).is_err());
    }

    #[test]
    fn clear_empties_player() {
        let mut session = session();
        session.execute(Command::List(2)).unwrap();

        session.execute(Command::Clear).unwrap();

        assert!(session.player().state().is_empty());
        assert!(session.player().output().loaded_url().is_none());
        assert!(session.bar().contains("Selecione um podcast"));
    }

    #[test]
    fn quit_stops_session() {
        assert_eq!(session().execute(Command::Quit), Ok(Flow::Quit));
    }

    // ===== Clock =====

    #[test]
    fn natural_end_walks_the_list_then_clears() {
        let mut session = session();
        session.execute(Command::List(2)).unwrap();
        session.take_events();

        session.tick(Duration::from_secs(2));
        assert_eq!(current_id(&session), Some("ep-3"));
        assert!(session.player().state().is_playing);

        let events = session.take_events();
        assert!(events.contains(&PlayerEvent::EpisodeFinished {
            episode_id: "ep-2".to_string()
        }));

        session.tick(Duration::from_secs(2));
        assert!(session.player().state().is_empty());
        assert!(session.take_events().contains(&PlayerEvent::Cleared));
    }

    #[test]
    fn loop_replays_current() {
        let mut session = session();
        session.execute(Command::List(1)).unwrap();
        session.execute(Command::Loop).unwrap();

        session.tick(Duration::from_secs(2));

        assert_eq!(current_id(&session), Some("ep-1"));
        assert!(session.player().output().is_playing());
        assert_eq!(session.player().output().position(), Duration::ZERO);
    }

    #[test]
    fn failed_load_reports_error() {
        let mut session = session();
        session
            .player_mut()
            .output_mut()
            .mark_unavailable("https://cdn/ep-1.mp3");

        session.execute(Command::Play(1)).unwrap();

        assert!(!session.player().state().is_playing);
        assert!(session
            .take_events()
            .iter()
            .any(|e| matches!(e, PlayerEvent::Error { .. })));
    }

    #[test]
    fn detail_episode_outside_listing() {
        let mut session = session();
        let extra = Episode::new("extra", "Extra", "https://cdn/extra.mp3", 5);

        session.play_episode(extra);

        assert_eq!(current_id(&session), Some("extra"));
        assert_eq!(
            session.player().output().loaded_url(),
            Some("https://cdn/extra.mp3")
        );
    }
}
