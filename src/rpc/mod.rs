/// JSON-RPC surface for the engine
///
/// Line-delimited JSON-RPC 2.0 over stdin/stdout, one request per line.

pub mod protocol;
pub mod server;

pub use server::RpcServer;
