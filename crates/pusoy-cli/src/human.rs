use std::collections::VecDeque;

use dialoguer::{Input, Select};
use pusoy_core::game::player::{ComboPolicy, TurnContext};
use pusoy_core::game::rules::{self, PlayError};
use pusoy_core::model::combo::{Combo, ComboKind};
use thiserror::Error;

use crate::render;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("terminal input failed: {0}")]
    Terminal(#[from] dialoguer::Error),
    #[error("no answer left for prompt '{0}'")]
    Exhausted(String),
}

impl From<PromptError> for PlayError {
    fn from(value: PromptError) -> Self {
        PlayError::PolicyFailed(value.to_string())
    }
}

/// Where a human's answers come from.
pub trait Prompter {
    /// Index into `items`.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize, PromptError>;

    /// A card index below `hand_len`.
    fn card_index(&mut self, prompt: &str, hand_len: usize) -> Result<usize, PromptError>;

    fn show(&mut self, text: &str);
}

#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize, PromptError> {
        Ok(Select::new()
            .with_prompt(prompt)
            .report(false)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn card_index(&mut self, prompt: &str, hand_len: usize) -> Result<usize, PromptError> {
        Ok(Input::<usize>::new()
            .with_prompt(prompt)
            .validate_with(|index: &usize| -> Result<(), String> {
                if *index < hand_len {
                    Ok(())
                } else {
                    Err("Invalid index.".to_string())
                }
            })
            .report(false)
            .interact_text()?)
    }

    fn show(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Replays canned answers and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<usize>,
    shown: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            shown: Vec::new(),
        }
    }

    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    fn next(&mut self, prompt: &str) -> Result<usize, PromptError> {
        self.answers
            .pop_front()
            .ok_or_else(|| PromptError::Exhausted(prompt.to_string()))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize, PromptError> {
        loop {
            let answer = self.next(prompt)?;
            if answer < items.len() {
                return Ok(answer);
            }
            self.show("Invalid choice.");
        }
    }

    fn card_index(&mut self, prompt: &str, hand_len: usize) -> Result<usize, PromptError> {
        loop {
            let answer = self.next(prompt)?;
            if answer < hand_len {
                return Ok(answer);
            }
            self.show("Invalid index.");
        }
    }

    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}

/// Kinds a human may answer `table` with.
pub fn follow_kinds(table: ComboKind) -> Vec<ComboKind> {
    ComboKind::PLAYABLE
        .iter()
        .copied()
        .filter(|kind| match table {
            ComboKind::Undefined => true,
            table if table.is_five_card() => kind.is_five_card() && *kind >= table,
            table => *kind == table,
        })
        .collect()
}

pub struct HumanPolicy<P: Prompter> {
    prompter: P,
}

impl<P: Prompter> HumanPolicy<P> {
    pub fn new(prompter: P) -> Self {
        Self { prompter }
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    fn choose_kind(&mut self, prompt: &str, kinds: &[ComboKind]) -> Result<ComboKind, PlayError> {
        let labels: Vec<String> = kinds.iter().map(|kind| kind.label().to_string()).collect();
        let choice = self.prompter.select(prompt, &labels)?;
        kinds
            .get(choice)
            .copied()
            .ok_or_else(|| PlayError::PolicyFailed(format!("no combo type at {choice}")))
    }

    /// `Ok(None)` when a card was rejected and the human should start over.
    fn pick_cards(
        &mut self,
        kind: ComboKind,
        ctx: &TurnContext<'_>,
    ) -> Result<Option<Combo>, PlayError> {
        let mut combo = Combo::with_owner(ctx.name, kind, *ctx.suits);
        while !combo.is_complete() {
            let prompt = format!("Card index to play [{}]", combo.len() + 1);
            let index = self.prompter.card_index(&prompt, ctx.hand.len())?;
            let card = ctx.hand.card_at(index)?;
            if let Err(err) = combo.add_card(card) {
                if !err.is_rejection() {
                    return Err(err.into());
                }
                self.prompter.show(&format!("{err}. Start over."));
                return Ok(None);
            }
        }
        Ok(Some(combo))
    }
}

impl<P: Prompter> ComboPolicy for HumanPolicy<P> {
    fn lead(&mut self, ctx: &TurnContext<'_>) -> Result<Combo, PlayError> {
        loop {
            self.prompter.show(&render::hand_with_indices(ctx.hand));
            if ctx.state.opening {
                self.prompter
                    .show("Opening combo: lead the 3 of clubs as a single.");
            }
            let kind = self.choose_kind("Combo type to lead with", &ComboKind::PLAYABLE)?;
            let Some(combo) = self.pick_cards(kind, ctx)? else {
                continue;
            };
            match rules::check_lead(ctx.state, &combo) {
                Ok(()) => return Ok(combo),
                Err(err) => self.prompter.show(&format!("{err}.")),
            }
        }
    }

    fn follow(&mut self, ctx: &TurnContext<'_>) -> Result<Option<Combo>, PlayError> {
        let table = &ctx.state.current_combo;
        let kinds = follow_kinds(table.kind());
        loop {
            self.prompter.show(&format!("To beat: {table}"));
            self.prompter.show(&render::hand_with_indices(ctx.hand));
            let options = ["Pass".to_string(), "Play".to_string()];
            if self.prompter.select("Pass or play?", &options)? == 0 {
                return Ok(None);
            }
            let kind = self.choose_kind("Combo type to follow with", &kinds)?;
            let Some(combo) = self.pick_cards(kind, ctx)? else {
                continue;
            };
            match rules::check_follow(table, &combo) {
                Ok(()) => return Ok(Some(combo)),
                Err(err) => self.prompter.show(&format!("{err}.")),
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
