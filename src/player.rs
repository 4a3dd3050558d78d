//! Player accounts, rolling match history and the login session.

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::common::AccountError;
use crate::config::HISTORY_CAPACITY;

/// Stable handle of a registered player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(usize);

/// The most recent match results, newest first. Holds at most
/// [`HISTORY_CAPACITY`] entries; pushing onto a full history drops the oldest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: String) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Newest entry.
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }
}

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    username: String,
    password: String,
    points: u32,
    history: History,
}

impl Player {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            points: 0,
            history: History::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn check_password(&self, password: &str) -> bool {
        self.password == password
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub(crate) fn add_points(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn record(&mut self, entry: String) {
        self.history.push(entry);
    }
}

/// Every registered player plus who is logged in.
#[derive(Debug, Clone, Default)]
pub struct Accounts {
    players: Vec<Player>,
    session: Option<PlayerId>,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new player and log them in.
    pub fn register(&mut self, username: &str, password: &str) -> Result<PlayerId, AccountError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() {
            return Err(AccountError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(AccountError::EmptyPassword);
        }
        if self.find(username).is_some() {
            return Err(AccountError::UsernameTaken);
        }
        self.players.push(Player::new(username, password));
        let id = PlayerId(self.players.len() - 1);
        self.session = Some(id);
        log::info!("registered player {}", username);
        Ok(id)
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<PlayerId, AccountError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AccountError::EmptyUsername);
        }
        let id = self.find(username).ok_or(AccountError::UnknownPlayer)?;
        if !self.players[id.0].check_password(password) {
            return Err(AccountError::WrongPassword);
        }
        self.session = Some(id);
        Ok(id)
    }

    pub(crate) fn logout(&mut self) {
        self.session = None;
    }

    /// The logged-in player.
    pub fn session(&self) -> Option<PlayerId> {
        self.session
    }

    pub fn current_user(&self) -> Option<&Player> {
        self.session.map(|id| &self.players[id.0])
    }

    pub fn find(&self, username: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|p| p.username() == username)
            .map(PlayerId)
    }

    pub fn exists(&self, username: &str) -> bool {
        self.find(username).is_some()
    }

    pub fn get(&self, id: PlayerId) -> &Player {
        &self.players[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.0]
    }

    pub fn player(&self, username: &str) -> Option<&Player> {
        self.find(username).map(|id| self.get(id))
    }

    /// All registered players, in registration order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }
}
