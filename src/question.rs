//! Headless question templates: what to show, which answers to offer and how to check them.
//! Rendering is left to the presentation layer.

use itertools::Itertools;
use log::debug;
use rand::rngs::StdRng;
use serde::Serialize;
use strum::{Display, EnumIter};

use crate::dataset::{Item, ItemKind, PHRASE_PUNCTUATION};
use crate::error::{Result, UnsupportedTemplateSnafu};
use crate::sampling::{pick, sample_distinct, shuffled};

const CHOICE_DISTRACTORS: usize = 3;
const ASSEMBLY_DISTRACTORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuestionTemplate {
    /// Georgian shown, pick the Russian side.
    ChoiceGeorgianToRussian,
    /// Russian shown, pick the Georgian side.
    ChoiceRussianToGeorgian,
    /// Georgian shown, type the Russian side.
    InputGeorgianToRussian,
    /// Russian shown, type the Georgian side.
    InputRussianToGeorgian,
    /// Transliteration shown, assemble the Georgian word from letter tiles.
    WordAssembly,
    /// Georgian word shown, type its transliteration.
    TransliterationInput,
    /// Georgian word shown, type its translation.
    TranslateInput,
    /// Russian phrase shown, assemble the Georgian phrase from word tiles.
    PhraseAssembly,
}

const LETTER_TEMPLATES: &[QuestionTemplate] = &[
    QuestionTemplate::ChoiceGeorgianToRussian,
    QuestionTemplate::ChoiceRussianToGeorgian,
    QuestionTemplate::InputGeorgianToRussian,
    QuestionTemplate::InputRussianToGeorgian,
    QuestionTemplate::WordAssembly,
    QuestionTemplate::TransliterationInput,
];

const WORD_TEMPLATES: &[QuestionTemplate] = &[
    QuestionTemplate::ChoiceGeorgianToRussian,
    QuestionTemplate::ChoiceRussianToGeorgian,
    QuestionTemplate::TranslateInput,
    QuestionTemplate::InputRussianToGeorgian,
];

const PHRASE_TEMPLATES: &[QuestionTemplate] = &[QuestionTemplate::PhraseAssembly];

impl QuestionTemplate {
    /// Templates drawn from for an item of the given kind.
    pub fn eligible_for(kind: ItemKind) -> &'static [QuestionTemplate] {
        match kind {
            ItemKind::Letter => LETTER_TEMPLATES,
            ItemKind::Word => WORD_TEMPLATES,
            ItemKind::Phrase => PHRASE_TEMPLATES,
        }
    }

    /// Whether a question of this shape can be built for the kind at all.
    pub fn supports(self, kind: ItemKind) -> bool {
        match self {
            Self::WordAssembly | Self::TransliterationInput => kind != ItemKind::Phrase,
            Self::PhraseAssembly => kind == ItemKind::Phrase,
            _ => true,
        }
    }

    /// Letters are drilled through a practice word for these templates.
    fn needs_practice_word(self) -> bool {
        matches!(self, Self::WordAssembly | Self::TransliterationInput)
    }
}

/// How the learner answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Response {
    Choice {
        options: Vec<String>,
    },
    Input,
    /// Tiles are picked from `pool` and joined with `separator`.
    Assembly {
        pool: Vec<String>,
        required_len: usize,
        separator: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// The scheduled item. For letter questions rendered through a practice word this is still
    /// the letter's id.
    pub item_id: String,
    pub template: QuestionTemplate,
    pub instruction: &'static str,
    pub prompt: String,
    pub response: Response,
    pub expected: String,
    pub hint: Option<String>,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !PHRASE_PUNCTUATION.contains(c))
        .collect()
}

impl Question {
    pub fn check(&self, answer: &str) -> bool {
        match (&self.response, self.template) {
            (Response::Choice { .. }, _) => answer == self.expected,
            (_, QuestionTemplate::PhraseAssembly) => {
                let expected = strip_punctuation(&normalize(&self.expected));
                strip_punctuation(&normalize(answer)) == expected
            }
            _ => normalize(answer) == normalize(&self.expected),
        }
    }

    /// Joins assembled tiles the way the template expects and checks the result.
    pub fn check_assembly<S: AsRef<str>>(&self, tiles: &[S]) -> bool {
        let separator = match &self.response {
            Response::Assembly { separator, .. } => *separator,
            _ => "",
        };
        let answer = tiles.iter().map(S::as_ref).join(separator);
        self.check(&answer)
    }
}

/// Everything a question may draw distractors or substitutes from.
#[derive(Debug, Clone, Copy)]
pub struct QuestionContext<'a> {
    /// Items of the running session; choice distractors come from here.
    pub pool: &'a [Item],
    /// Letter tiles for word assembly.
    pub letters: &'a [Item],
    /// Words rendered in place of a letter by assembly and transliteration templates.
    pub practice_words: &'a [Item],
}

impl QuestionContext<'_> {
    /// Eligible templates that can actually be built with this context.
    pub fn templates_for(&self, kind: ItemKind) -> Vec<QuestionTemplate> {
        QuestionTemplate::eligible_for(kind)
            .iter()
            .copied()
            .filter(|t| {
                kind != ItemKind::Letter
                    || !t.needs_practice_word()
                    || !self.practice_words.is_empty()
            })
            .collect()
    }

    pub fn choose_template(&self, kind: ItemKind, rng: &mut StdRng) -> QuestionTemplate {
        pick(&self.templates_for(kind), rng)
            .copied()
            .unwrap_or(QuestionTemplate::ChoiceGeorgianToRussian)
    }

    fn choice_options(
        &self,
        rendered: &Item,
        correct: &str,
        side: fn(&Item) -> &str,
        rng: &mut StdRng,
    ) -> Vec<String> {
        let others = self
            .pool
            .iter()
            .filter(|other| other.kind() == rendered.kind())
            .map(side)
            .filter(|text| *text != correct)
            .unique()
            .collect_vec();
        let mut options = vec![correct.to_owned()];
        options.extend(
            sample_distinct(&others, CHOICE_DISTRACTORS, rng)
                .into_iter()
                .map(str::to_owned),
        );
        shuffled(&options, rng)
    }

    fn letter_pool(&self, word: &str, rng: &mut StdRng) -> Vec<String> {
        let tiles = word.chars().map(String::from).collect_vec();
        let spare = self
            .letters
            .iter()
            .map(Item::source_text)
            .filter(|letter| !tiles.iter().any(|tile| tile == letter))
            .collect_vec();
        let mut pool = tiles.clone();
        pool.extend(
            sample_distinct(&spare, ASSEMBLY_DISTRACTORS, rng)
                .into_iter()
                .map(str::to_owned),
        );
        shuffled(&pool, rng)
    }

    /// Builds a question of the given shape for `item`.
    pub fn build(
        &self,
        item: &Item,
        template: QuestionTemplate,
        rng: &mut StdRng,
    ) -> Result<Question> {
        let kind = item.kind();
        if !template.supports(kind) {
            return UnsupportedTemplateSnafu { template, kind }.fail();
        }
        let rendered = if kind == ItemKind::Letter && template.needs_practice_word() {
            match pick(self.practice_words, rng) {
                Some(word) => {
                    debug!("rendering {} through practice word {}", item.id, word.id);
                    word
                }
                None => return UnsupportedTemplateSnafu { template, kind }.fail(),
            }
        } else {
            item
        };
        let is_word = rendered.kind() == ItemKind::Word;
        let georgian = rendered.source_text();
        let russian = rendered.target_text();

        let (instruction, prompt, response, expected, hint) = match template {
            QuestionTemplate::ChoiceGeorgianToRussian => (
                if is_word {
                    "Выберите перевод"
                } else {
                    "Какая буква соответствует?"
                },
                georgian.to_owned(),
                Response::Choice {
                    options: self.choice_options(rendered, russian, Item::target_text, rng),
                },
                russian.to_owned(),
                is_word.then(|| russian.to_owned()),
            ),
            QuestionTemplate::ChoiceRussianToGeorgian => (
                if is_word {
                    "Выберите перевод"
                } else {
                    "Выберите на грузинском"
                },
                russian.to_owned(),
                Response::Choice {
                    options: self.choice_options(rendered, georgian, Item::source_text, rng),
                },
                georgian.to_owned(),
                is_word.then(|| georgian.to_owned()),
            ),
            QuestionTemplate::InputGeorgianToRussian => (
                "Напишите соответствие",
                georgian.to_owned(),
                Response::Input,
                russian.to_owned(),
                None,
            ),
            QuestionTemplate::InputRussianToGeorgian => (
                if is_word {
                    "Напишите перевод"
                } else {
                    "Напишите на грузинском"
                },
                russian.to_owned(),
                Response::Input,
                georgian.to_owned(),
                is_word.then(|| georgian.to_owned()),
            ),
            QuestionTemplate::WordAssembly => (
                "Соберите слово из букв",
                rendered.transliteration().unwrap_or(russian).to_owned(),
                Response::Assembly {
                    pool: self.letter_pool(georgian, rng),
                    required_len: georgian.chars().count(),
                    separator: "",
                },
                georgian.to_owned(),
                Some(russian.to_owned()),
            ),
            QuestionTemplate::TransliterationInput => (
                "Напишите транслитерацию",
                georgian.to_owned(),
                Response::Input,
                rendered.transliteration().unwrap_or(russian).to_owned(),
                Some(russian.to_owned()),
            ),
            QuestionTemplate::TranslateInput => (
                "Переведите слово",
                georgian.to_owned(),
                Response::Input,
                russian.to_owned(),
                Some(russian.to_owned()),
            ),
            QuestionTemplate::PhraseAssembly => (
                "Соберите фразу",
                russian.to_owned(),
                Response::Assembly {
                    pool: shuffled(rendered.tokens(), rng),
                    required_len: rendered.tokens().len(),
                    separator: " ",
                },
                georgian.to_owned(),
                Some(georgian.to_owned()),
            ),
        };

        Ok(Question {
            item_id: item.id.clone(),
            template,
            instruction,
            prompt,
            response,
            expected,
            hint,
        })
    }
}
