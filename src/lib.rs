//! Root crate facade for the Snippetbox server.

pub use snippetbox_core::{
    clock, config, db, error, models, service, view, AppError, Clock, Config, Database,
    ErrorKind, Renderer, SnippetService, SnippetStore, TeraRenderer,
};
pub use snippetbox_server::{
    create_app, handlers, resolve_bind_address, serve_router, AppState,
};
