mod autocomplete_flow;
mod chat_flow;
mod helpers;
mod history_store;
mod render;
mod server_routes;
