/// Use cases module containing application business logic orchestration
mod audit_dependencies;

pub use audit_dependencies::AuditDependenciesUseCase;
