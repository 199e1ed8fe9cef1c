use snafu::Snafu;

use crate::dataset::ItemKind;
use crate::question::QuestionTemplate;

#[derive(Snafu, Debug, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum DrillError {
    #[snafu(display("no progress is tracked for item `{id}`"))]
    UnknownItem { id: String },
    #[snafu(display("invalid scheduler configuration: {reason}"))]
    InvalidConfig { reason: &'static str },
    #[snafu(display("item id `{id}` appears more than once"))]
    DuplicateItem { id: String },
    #[snafu(display("template {template} cannot be used for a {kind}"))]
    UnsupportedTemplate {
        template: QuestionTemplate,
        kind: ItemKind,
    },
    #[snafu(display("there is no open question to answer"))]
    NoPendingQuestion,
}

pub type Result<T, E = DrillError> = std::result::Result<T, E>;
