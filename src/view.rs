//! Presentation contract
//!
//! A presenter receives every state the reducer emits and draws it. Nodes are
//! keyed by entity id: created the first time an id shows up, moved after
//! that, and never removed. Tokens replaced after a capture therefore keep
//! their last position, which is where they are drawn as parked tokens.

use std::collections::BTreeMap;
use std::io;

use glam::Vec2;

use crate::sim::{Category, Entity, GameState, Shape};

/// Anything that can draw a game state
pub trait Presenter {
    fn present(&mut self, state: &GameState) -> io::Result<()>;
}

/// Last known appearance of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub category: Category,
    pub shape: Shape,
    pub pos: Vec2,
    pub index: u32,
}

impl Node {
    fn from_entity(e: &Entity) -> Self {
        Self {
            category: e.category,
            shape: e.shape,
            pos: e.pos,
            index: e.index,
        }
    }
}

/// Whether the token marker for `capture_index` should be drawn.
///
/// The live token is always shown; earlier indices stay visible as parked
/// tokens until the capture counter drops back (full clear or restart).
pub fn token_marker_visible(state: &GameState, capture_index: u32) -> bool {
    capture_index == state.token.index || capture_index < state.goals_captured
}

/// Id-keyed scene built up from successive states
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<String, Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or move the node of every entity in `state`
    pub fn update(&mut self, state: &GameState) {
        let entities = std::iter::once(&state.token)
            .chain(&state.obstacles)
            .chain(&state.platforms)
            .chain(&state.goal_markers);
        for e in entities {
            match self.nodes.get_mut(&e.id) {
                Some(node) => node.pos = e.pos,
                None => {
                    log::trace!("New scene node {}", e.id);
                    self.nodes.insert(e.id.clone(), Node::from_entity(e));
                }
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes of one category, in id order
    pub fn nodes_of(&self, category: Category) -> impl Iterator<Item = (&str, &Node)> {
        self.nodes
            .iter()
            .filter(move |(_, n)| n.category == category)
            .map(|(id, n)| (id.as_str(), n))
    }

    /// Token nodes that should be drawn for `state`
    pub fn visible_tokens<'a>(
        &'a self,
        state: &'a GameState,
    ) -> impl Iterator<Item = (&'a str, &'a Node)> {
        self.nodes_of(Category::Token)
            .filter(move |(_, n)| token_marker_visible(state, n.index))
    }
}

/// Text shown around the playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub up_moves: String,
    pub score: String,
    pub highest_score: String,
    pub session_best: Option<String>,
    pub game_over: bool,
}

impl Hud {
    pub fn from_state(state: &GameState, session_best: Option<u32>) -> Self {
        Self {
            up_moves: state.up_move_count.to_string(),
            score: state.score.to_string(),
            highest_score: state.highest_score.to_string(),
            session_best: session_best.map(|b| b.to_string()),
            game_over: state.is_game_over,
        }
    }

    /// Single status line
    pub fn line(&self) -> String {
        let mut line = format!(
            "Moves {}  Score {}  High {}",
            self.up_moves, self.score, self.highest_score
        );
        if let Some(best) = &self.session_best {
            line.push_str(&format!("  Best {}", best));
        }
        line
    }
}
