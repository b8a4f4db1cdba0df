pub mod json;
pub mod path;
pub mod query;
pub mod validated;

pub trait Extractor {
    type Extracted;

    fn extracted(&self) -> &Self::Extracted;
}
