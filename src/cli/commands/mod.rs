mod ingest;
mod init;
mod list;
mod search;
mod serve;

pub use ingest::cmd_ingest;
pub use init::cmd_init;
pub use list::cmd_list_manga;
pub use search::cmd_search_manga;
pub use serve::cmd_serve;
