// Library root
// -----------
// Getting-started walkthrough for the vault service. The binary
// (`main.rs`) wires these modules together.
//
// Module responsibilities:
// - `config`: Connection settings read from environment variables
//   (host, port, API key).
// - `api`: A blocking HTTP client over the vault's REST API, split into
//   resource-scoped sub-clients (system, collections, objects, tokens).
// - `walkthrough`: The step 1-7 demo sequence with console narration
//   and response-shape assertions.
//
// Keeping the api layer separate from the walkthrough makes the request
// plumbing testable without a running vault.
pub mod api;
pub mod config;
pub mod walkthrough;
