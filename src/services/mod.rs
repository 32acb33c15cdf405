pub mod completion;
pub mod composer;
pub mod images;

pub use completion::{CompletionApi, OpenAiCompletion, StructuredClient};
pub use composer::{ItineraryComposer, OnEmpty};
pub use images::{request_illustration, ImageApi, OpenAiImages};
