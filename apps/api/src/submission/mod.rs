// Submission pipeline: validate user input, dispatch to one backend, normalize.
// All backend traffic goes through backend_client; nothing here builds HTTP requests.

pub mod builder;
pub mod handlers;
pub mod models;
pub mod validation;
