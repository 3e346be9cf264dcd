//! The interactive game session: command interpreter and turn loop state.
//!
//! One session owns the in-memory player state exclusively; the store holds
//! the durable copy, written on quit. Input is lowercased and dispatched on
//! its first whitespace-delimited token. Anything that isn't one of the
//! seven built-in commands goes to the intent resolver as free text, so any
//! natural-language input still produces a reply.

use std::sync::Arc;

use echoes_domain::{
    PlayerState, SessionAttributes, WorldModel, PLAYER_ID_ATTRIBUTE,
};
use echoes_store::PlayerRepo;

use crate::ports::{ResolverPort, RESOLVER_FAULT_TEXT};

const WELCOME_TEXT: &str = "Welcome to Echoes of the Ancients!";
const RESTORED_TEXT: &str = "Loading saved game...";
const SAVED_TEXT: &str = "Game state saved.";
const SAVE_FAILED_TEXT: &str = "Game state could not be saved.";
const CANT_GO_TEXT: &str = "You can't go that way.";
const EMPTY_INVENTORY_TEXT: &str = "You are carrying nothing.";

/// Outcome of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Print this and read the next command.
    Say(String),
    /// Print this and stop the loop.
    Quit(String),
}

/// One player's interactive session.
pub struct GameSession {
    world: WorldModel,
    state: PlayerState,
    session_attributes: SessionAttributes,
    store: Arc<dyn PlayerRepo>,
    resolver: Arc<dyn ResolverPort>,
}

impl GameSession {
    /// Restore the player's saved game, or start fresh if there is none (or
    /// the store is unreachable - a load fault must not keep the player from
    /// playing). Returns the session plus its opening text.
    pub async fn start(
        player_id: &str,
        store: Arc<dyn PlayerRepo>,
        resolver: Arc<dyn ResolverPort>,
    ) -> (Self, String) {
        let (state, intro) = match store.load(player_id).await {
            Ok(Some(state)) => (state, RESTORED_TEXT.to_string()),
            Ok(None) => {
                let state = PlayerState::new(player_id);
                let world = WorldModel::default();
                let intro = format!("{WELCOME_TEXT}\n{}", world.describe(&state.current_location));
                (state, intro)
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading saved game failed, starting fresh");
                let state = PlayerState::new(player_id);
                let world = WorldModel::default();
                let intro = format!("{WELCOME_TEXT}\n{}", world.describe(&state.current_location));
                (state, intro)
            }
        };

        let mut world = WorldModel::default();
        // The location table is rebuilt fresh each run; items the player
        // already carries must leave the world again so no item has two
        // owners.
        for item in &state.inventory {
            world.claim_item(item);
        }

        let mut session_attributes = SessionAttributes::new();
        session_attributes.insert(PLAYER_ID_ATTRIBUTE.to_string(), player_id.to_string());

        let session = Self {
            world,
            state,
            session_attributes,
            store,
            resolver,
        };
        (session, intro)
    }

    /// Interpret one line of player input.
    pub async fn handle_line(&mut self, line: &str) -> Turn {
        let input = line.trim().to_lowercase();
        let (command, argument) = match input.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (input.as_str(), ""),
        };

        match (command, argument) {
            ("quit", "") => self.quit().await,
            ("talk", text) => self.talk(text).await,
            ("look", "") => Turn::Say(self.world.describe(&self.state.current_location).to_string()),
            ("inventory", "") => Turn::Say(self.inventory_listing()),
            ("go", direction) => Turn::Say(self.go(direction)),
            ("take", item) => Turn::Say(self.take(item)),
            // Not a built-in command: the whole line goes to the resolver.
            _ => self.talk(&input).await,
        }
    }

    async fn quit(&mut self) -> Turn {
        match self.store.save(&self.state).await {
            Ok(()) => Turn::Quit(SAVED_TEXT.to_string()),
            Err(e) => {
                tracing::error!(error = %e, "saving game state failed");
                Turn::Quit(SAVE_FAILED_TEXT.to_string())
            }
        }
    }

    async fn talk(&mut self, utterance: &str) -> Turn {
        match self
            .resolver
            .resolve(utterance, &self.session_attributes)
            .await
        {
            Ok(reply) => {
                if let Some(attributes) = reply.session_attributes {
                    self.session_attributes = attributes;
                }
                Turn::Say(reply.message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "resolver call failed");
                Turn::Say(RESOLVER_FAULT_TEXT.to_string())
            }
        }
    }

    fn inventory_listing(&self) -> String {
        if self.state.inventory.is_empty() {
            return EMPTY_INVENTORY_TEXT.to_string();
        }
        let mut listing = String::from("You are carrying:");
        for item in &self.state.inventory {
            listing.push_str("\n- ");
            listing.push_str(item);
        }
        listing
    }

    fn go(&mut self, direction: &str) -> String {
        let target = self
            .world
            .exits_of(&self.state.current_location)
            .get(direction)
            .cloned();
        match target {
            Some(target) => {
                self.state.current_location = target;
                self.world.describe(&self.state.current_location).to_string()
            }
            None => CANT_GO_TEXT.to_string(),
        }
    }

    fn take(&mut self, item: &str) -> String {
        if self.world.take_item(&self.state.current_location, item) {
            self.state.add_item(item);
            format!("You take the {item}.")
        } else {
            format!("There is no {item} here.")
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use echoes_domain::STARTING_LOCATION;
    use echoes_protocol::ResolverReply;
    use echoes_store::MemoryPlayerRepo;

    use super::*;
    use crate::ports::MockResolverPort;

    async fn fresh_session(resolver: MockResolverPort) -> (GameSession, String) {
        GameSession::start(
            "test_player",
            Arc::new(MemoryPlayerRepo::new()),
            Arc::new(resolver),
        )
        .await
    }

    fn say(turn: Turn) -> String {
        match turn {
            Turn::Say(text) => text,
            other => panic!("expected Say, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn new_game_opens_with_the_welcome_banner_and_description() {
        let (_, intro) = fresh_session(MockResolverPort::new()).await;
        assert_eq!(
            intro,
            "Welcome to Echoes of the Ancients!\nYou are in a dimly lit chamber."
        );
    }

    #[tokio::test]
    async fn look_prints_the_current_location_description() {
        let (mut session, _) = fresh_session(MockResolverPort::new()).await;
        let turn = session.handle_line("look").await;
        assert_eq!(say(turn), "You are in a dimly lit chamber.");
    }

    #[tokio::test]
    async fn go_follows_an_existing_exit_and_prints_the_destination() {
        let (mut session, _) = fresh_session(MockResolverPort::new()).await;
        let turn = session.handle_line("go north").await;
        assert_eq!(say(turn), "You are in a cold, stone chamber.");
        assert_eq!(session.state().current_location, "north_chamber");
    }

    #[tokio::test]
    async fn go_in_a_bad_direction_changes_nothing() {
        let (mut session, _) = fresh_session(MockResolverPort::new()).await;
        let turn = session.handle_line("go west").await;
        assert_eq!(say(turn), "You can't go that way.");
        assert_eq!(session.state().current_location, STARTING_LOCATION);
    }

    #[tokio::test]
    async fn take_moves_a_present_item_into_inventory_exactly_once() {
        let (mut session, _) = fresh_session(MockResolverPort::new()).await;
        let turn = session.handle_line("take torch").await;
        assert_eq!(say(turn), "You take the torch.");
        assert_eq!(session.state().inventory, vec!["torch"]);

        // The torch left the world; a second take finds nothing.
        let turn = session.handle_line("take torch").await;
        assert_eq!(say(turn), "There is no torch here.");
        assert_eq!(session.state().inventory, vec!["torch"]);
    }

    #[tokio::test]
    async fn take_of_an_absent_item_mutates_nothing() {
        let (mut session, _) = fresh_session(MockResolverPort::new()).await;
        let turn = session.handle_line("take key").await;
        assert_eq!(say(turn), "There is no key here.");
        assert!(session.state().inventory.is_empty());
    }

    #[tokio::test]
    async fn inventory_lists_carried_items_in_order() {
        let (mut session, _) = fresh_session(MockResolverPort::new()).await;
        let turn = session.handle_line("inventory").await;
        assert_eq!(say(turn), "You are carrying nothing.");

        session.handle_line("take torch").await;
        session.handle_line("go north").await;
        session.handle_line("take key").await;
        let turn = session.handle_line("inventory").await;
        assert_eq!(say(turn), "You are carrying:\n- torch\n- key");
    }

    #[tokio::test]
    async fn commands_are_case_insensitive() {
        let (mut session, _) = fresh_session(MockResolverPort::new()).await;
        let turn = session.handle_line("  GO North  ").await;
        assert_eq!(say(turn), "You are in a cold, stone chamber.");
    }

    #[tokio::test]
    async fn talk_forwards_text_and_adopts_returned_session_attributes() {
        let mut resolver = MockResolverPort::new();
        resolver
            .expect_resolve()
            .withf(|utterance, attributes| {
                utterance == "hello there"
                    && attributes.get(PLAYER_ID_ATTRIBUTE).map(String::as_str)
                        == Some("test_player")
            })
            .times(1)
            .returning(|_, _| {
                let mut attributes = SessionAttributes::new();
                attributes.insert("player_id".to_string(), "test_player".to_string());
                attributes.insert("npc".to_string(), "guard".to_string());
                Ok(ResolverReply {
                    message: "The guard nods.".to_string(),
                    session_attributes: Some(attributes),
                })
            });

        let (mut session, _) = fresh_session(resolver).await;
        let turn = session.handle_line("talk hello there").await;
        assert_eq!(say(turn), "The guard nods.");
        assert_eq!(
            session.session_attributes.get("npc"),
            Some(&"guard".to_string())
        );
    }

    #[tokio::test]
    async fn reply_without_attributes_keeps_the_previous_ones() {
        let mut resolver = MockResolverPort::new();
        resolver.expect_resolve().returning(|_, _| {
            Ok(ResolverReply {
                message: "Hm?".to_string(),
                session_attributes: None,
            })
        });

        let (mut session, _) = fresh_session(resolver).await;
        session.handle_line("talk anyone here").await;
        assert_eq!(
            session.session_attributes.get(PLAYER_ID_ATTRIBUTE),
            Some(&"test_player".to_string())
        );
    }

    #[tokio::test]
    async fn resolver_fault_degrades_to_the_fixed_reply() {
        let mut resolver = MockResolverPort::new();
        resolver.expect_resolve().returning(|_, _| {
            Err(crate::ports::ResolverError::RequestFailed(
                "connection refused".to_string(),
            ))
        });

        let (mut session, _) = fresh_session(resolver).await;
        let turn = session.handle_line("talk hello").await;
        assert_eq!(say(turn), "An error occurred communicating with the game.");
        assert_eq!(
            session.session_attributes.get(PLAYER_ID_ATTRIBUTE),
            Some(&"test_player".to_string())
        );
    }

    #[tokio::test]
    async fn unmatched_input_falls_through_to_the_resolver() {
        let mut resolver = MockResolverPort::new();
        resolver
            .expect_resolve()
            .withf(|utterance, _| utterance == "dance wildly")
            .times(1)
            .returning(|_, _| {
                Ok(ResolverReply {
                    message: "You dance. Nothing happens.".to_string(),
                    session_attributes: None,
                })
            });

        let (mut session, _) = fresh_session(resolver).await;
        let turn = session.handle_line("dance wildly").await;
        assert_eq!(say(turn), "You dance. Nothing happens.");
    }

    #[tokio::test]
    async fn look_with_an_argument_is_not_the_look_command() {
        let mut resolver = MockResolverPort::new();
        resolver
            .expect_resolve()
            .withf(|utterance, _| utterance == "look torch")
            .times(1)
            .returning(|_, _| {
                Ok(ResolverReply {
                    message: "It flickers.".to_string(),
                    session_attributes: None,
                })
            });

        let (mut session, _) = fresh_session(resolver).await;
        let turn = session.handle_line("look torch").await;
        assert_eq!(say(turn), "It flickers.");
    }

    #[tokio::test]
    async fn quit_saves_the_full_record_and_ends_the_loop() {
        let store = Arc::new(MemoryPlayerRepo::new());
        let (mut session, _) = GameSession::start(
            "test_player",
            store.clone(),
            Arc::new(MockResolverPort::new()),
        )
        .await;

        session.handle_line("take torch").await;
        session.handle_line("go north").await;
        let turn = session.handle_line("quit").await;
        assert_eq!(turn, Turn::Quit("Game state saved.".to_string()));

        let record = store
            .load("test_player")
            .await
            .expect("load")
            .expect("record");
        assert_eq!(record.current_location, "north_chamber");
        assert_eq!(record.inventory, vec!["torch"]);
    }

    #[tokio::test]
    async fn restored_games_keep_carried_items_out_of_the_world() {
        let store = Arc::new(MemoryPlayerRepo::new());
        let mut saved = PlayerState::new("test_player");
        saved.add_item("torch");
        store.save(&saved).await.expect("save");

        let (mut session, intro) = GameSession::start(
            "test_player",
            store.clone(),
            Arc::new(MockResolverPort::new()),
        )
        .await;
        assert_eq!(intro, "Loading saved game...");

        // The carried torch no longer lies in the starting chamber.
        let turn = session.handle_line("take torch").await;
        assert_eq!(say(turn), "There is no torch here.");
        assert_eq!(session.state().inventory, vec!["torch"]);
    }

    #[tokio::test]
    async fn quit_save_round_trips_progress_and_quests() {
        use echoes_domain::{Quest, QuestStatus};

        let store = Arc::new(MemoryPlayerRepo::new());
        let mut saved = PlayerState::new("test_player");
        saved.progress = Some("Met the guard.".to_string());
        saved.quests.insert(
            "find_artifact".to_string(),
            Quest {
                status: QuestStatus::InProgress,
                description: "Find the ancient artifact in the hidden room.".to_string(),
            },
        );
        store.save(&saved).await.expect("save");

        let (mut session, _) = GameSession::start(
            "test_player",
            store.clone(),
            Arc::new(MockResolverPort::new()),
        )
        .await;
        session.handle_line("take torch").await;
        session.handle_line("quit").await;

        let record = store
            .load("test_player")
            .await
            .expect("load")
            .expect("record");
        assert_eq!(record.progress.as_deref(), Some("Met the guard."));
        assert!(record.quests.contains_key("find_artifact"));
        assert_eq!(record.inventory, vec!["torch"]);
    }
}
