//! HTTP delivery for the Shelf catalogue.
//!
//! Turns REST requests into service calls and service results into JSON
//! responses. Path ids are parsed here; every business rule lives in
//! `shelf-service`.
//!
//! | method | path          | operation        |
//! |--------|---------------|------------------|
//! | POST   | `/author`     | create author    |
//! | PUT    | `/author/:id` | update author    |
//! | DELETE | `/author/:id` | delete author    |
//! | POST   | `/book`       | create book      |
//! | GET    | `/books`      | list books (`?title=&includeAuthor=true`) |
//! | GET    | `/book/:id`   | fetch book       |
//! | PUT    | `/book/:id`   | update book      |
//! | DELETE | `/book/:id`   | delete book      |

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::{DatabaseConfig, ServerConfig};
pub use error::{ApiError, ErrorResponse, ServerError, ServerResult};
pub use router::build_router;
pub use server::ShelfServer;
pub use state::AppState;
