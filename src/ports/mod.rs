/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) describe what the audit core needs from the
/// outside world: files, the advisory database, the console and the output sink.
pub mod outbound;
