// Composition root for the generator log service.
//
// Responsibilities:
// - Read config from environment.
// - Open the configured entry store.
// - Wire the store and the PDF renderer into the use case services.
// - Expose the HTTP router.

pub mod config;
pub mod http;
pub mod state;
