use crate::entity::Player;
use std::collections::{HashMap, VecDeque};

/// Backend-neutral key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft(Player),
    MoveRight(Player),
    TogglePause,
    Reset,
    Quit,
}

/// Key → command dispatch table
#[derive(Debug, Clone)]
pub struct KeyBindings {
    table: HashMap<Key, Command>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key: Key, command: Command) -> &mut Self {
        self.table.insert(key, command);
        self
    }

    /// Exact match; letters are case-sensitive
    pub fn lookup(&self, key: Key) -> Option<Command> {
        self.table.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings
            .bind(Key::Char('a'), Command::MoveLeft(Player::One))
            .bind(Key::Char('d'), Command::MoveRight(Player::One))
            .bind(Key::Left, Command::MoveLeft(Player::Two))
            .bind(Key::Right, Command::MoveRight(Player::Two))
            .bind(Key::Char('p'), Command::TogglePause)
            .bind(Key::Char('r'), Command::Reset)
            .bind(Key::Char('q'), Command::Quit);
        bindings
    }
}

/// FIFO of commands waiting for the next tick
#[derive(Debug, Clone)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
    capacity: usize,
}

impl CommandQueue {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns false when the queue is full and the command was dropped
    pub fn push(&mut self, command: Command) -> bool {
        if self.pending.len() >= self.capacity {
            return false;
        }
        self.pending.push_back(command);
        true
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.lookup(Key::Char('a')),
            Some(Command::MoveLeft(Player::One))
        );
        assert_eq!(
            bindings.lookup(Key::Char('d')),
            Some(Command::MoveRight(Player::One))
        );
        assert_eq!(bindings.lookup(Key::Left), Some(Command::MoveLeft(Player::Two)));
        assert_eq!(bindings.lookup(Key::Right), Some(Command::MoveRight(Player::Two)));
        assert_eq!(bindings.lookup(Key::Char('p')), Some(Command::TogglePause));
        assert_eq!(bindings.lookup(Key::Char('r')), Some(Command::Reset));
        assert_eq!(bindings.lookup(Key::Char('q')), Some(Command::Quit));
    }

    #[test]
    fn test_uppercase_letters_are_unbound() {
        let bindings = KeyBindings::default();
        for c in ['A', 'D', 'P', 'R', 'Q'] {
            assert_eq!(bindings.lookup(Key::Char(c)), None, "{c}");
        }
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(KeyBindings::default().lookup(Key::Char('x')), None);
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = CommandQueue::default();
        queue.push(Command::TogglePause);
        queue.push(Command::Reset);
        assert_eq!(queue.pop(), Some(Command::TogglePause));
        assert_eq!(queue.pop(), Some(Command::Reset));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_queue_drops_when_full() {
        let mut queue = CommandQueue::new(2);
        assert!(queue.push(Command::Reset));
        assert!(queue.push(Command::Reset));
        assert!(!queue.push(Command::Quit));
        assert_eq!(queue.len(), 2);
        queue.clear();
        assert!(queue.is_empty());
    }
}
