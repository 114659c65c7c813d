mod requests;
mod responses;

pub use requests::CreatePostRequest;
pub use responses::Envelope;
