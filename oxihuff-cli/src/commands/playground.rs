//! Playground command implementation.
//!
//! An interactive session over one [`PriorityQueue`]: insert leaves, extract
//! the minimum, change a weight or heapify a whole array, and watch the
//! backing array after each step.

use crate::utils::{fmt_symbol, parse_symbol};
use dialoguer::{Input, Select};
use oxihuff_codec::{Node, PriorityQueue};

/// Sample array offered by the build action.
pub const SAMPLE: [(u8, u64); 3] = [(b'P', 12), (b'Q', 4), (b'R', 7)];

/// One step of the playground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Insert a leaf.
    Insert { symbol: u8, weight: u64 },
    /// Remove and show the minimum.
    ExtractMin,
    /// Change the weight of a queued leaf.
    UpdateWeight { symbol: u8, weight: u64 },
    /// Replace the queue with the given leaves and heapify.
    Build(Vec<(u8, u64)>),
}

/// Queue state owned by one playground run.
#[derive(Debug, Default)]
pub struct PlaygroundSession {
    queue: PriorityQueue,
}

impl PlaygroundSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action` and describe the outcome.
    pub fn apply(&mut self, action: Action) -> String {
        let outcome = match action {
            Action::Insert { symbol, weight } => {
                self.queue.insert(Node::leaf(symbol, weight));
                "OK".to_string()
            }
            Action::ExtractMin => match self.queue.extract_min() {
                Ok(node) => format!("Extracted: {}", show_node(&node)),
                Err(e) => format!("Error: {}", e),
            },
            Action::UpdateWeight { symbol, weight } => {
                if self.queue.update_weight(symbol, weight) {
                    "OK".to_string()
                } else {
                    format!("Not found: {}", fmt_symbol(symbol))
                }
            }
            Action::Build(leaves) => {
                if leaves.is_empty() {
                    "Nothing to build".to_string()
                } else {
                    let nodes = leaves
                        .into_iter()
                        .map(|(symbol, weight)| Node::leaf(symbol, weight))
                        .collect();
                    self.queue.build_from_array(nodes);
                    "Built".to_string()
                }
            }
        };

        debug_assert!(self.queue.is_heap());
        log::trace!("heap after step: {}", self.render());
        outcome
    }

    /// The backing array in heap order.
    pub fn render(&self) -> String {
        if self.queue.is_empty() {
            return "Heap: (empty)".to_string();
        }

        let nodes: Vec<String> = self
            .queue
            .as_slice()
            .iter()
            .map(|node| format!("({})", show_node(node)))
            .collect();
        format!("Heap: {}", nodes.join(" "))
    }
}

fn show_node(node: &Node) -> String {
    match node.symbol() {
        Some(symbol) => format!("{}:{}", fmt_symbol(symbol), node.weight()),
        None => node.to_string(),
    }
}

/// Parse `"<symbol> <weight>"`, for example `A 5` or `[SP] 3`.
pub fn parse_pair(text: &str) -> Option<(u8, u64)> {
    let mut parts = text.split_whitespace();
    let symbol = parse_symbol(parts.next()?)?;
    let weight = parts.next()?.parse().ok()?;
    match parts.next() {
        Some(_) => None,
        None => Some((symbol, weight)),
    }
}

const MENU: [&str; 6] = [
    "Insert",
    "Extract min",
    "Update weight",
    "Build from sample (P:12 Q:4 R:7)",
    "Build from custom array",
    "Quit",
];

pub fn cmd_playground() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = PlaygroundSession::new();

    println!("Priority Queue Playground");
    println!("=========================");
    println!("Symbols: a character, [SP], [NL], [TAB] or a hex byte like 0x41");

    loop {
        println!();
        println!("{}", session.render());

        let choice = Select::new()
            .with_prompt("Action")
            .items(&MENU)
            .default(0)
            .interact()?;

        let action = match choice {
            0 => match prompt_pair("Symbol and weight")? {
                Some((symbol, weight)) => Action::Insert { symbol, weight },
                None => continue,
            },
            1 => Action::ExtractMin,
            2 => match prompt_pair("Symbol and new weight")? {
                Some((symbol, weight)) => Action::UpdateWeight { symbol, weight },
                None => continue,
            },
            3 => Action::Build(SAMPLE.to_vec()),
            4 => Action::Build(prompt_array()?),
            _ => break,
        };

        println!("{}", session.apply(action));
    }

    Ok(())
}

fn prompt_pair(prompt: &str) -> Result<Option<(u8, u64)>, Box<dyn std::error::Error>> {
    let text: String = Input::new().with_prompt(prompt).interact_text()?;
    let pair = parse_pair(&text);
    if pair.is_none() {
        println!("Invalid input: expected '<symbol> <weight>'");
    }
    Ok(pair)
}

fn prompt_array() -> Result<Vec<(u8, u64)>, Box<dyn std::error::Error>> {
    println!("Enter one '<symbol> <weight>' per line, empty line to finish");

    let mut leaves = Vec::new();
    loop {
        let text: String = Input::new()
            .with_prompt(format!("#{}", leaves.len() + 1))
            .allow_empty(true)
            .interact_text()?;
        if text.trim().is_empty() {
            break;
        }
        match parse_pair(&text) {
            Some(pair) => leaves.push(pair),
            None => println!("Invalid input, skipped"),
        }
    }
    Ok(leaves)
}
