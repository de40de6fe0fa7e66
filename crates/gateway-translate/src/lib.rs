//! Pure, side-effect-free conversion between the Ollama wire shape and the
//! upstream call shape. Every function here either succeeds or raises a
//! request-shape error; none of them perform I/O or retry anything.

pub mod chat;
pub mod digest;
pub mod embed;
pub mod generate;
pub mod options;
pub mod response;
pub mod tags;
pub mod timestamp;

pub use chat::translate_chat;
pub use embed::{build_embed_response, translate_embed};
pub use generate::translate_generate;
pub use response::{build_chat_response, build_generate_response, Timings};
pub use tags::translate_tags;
