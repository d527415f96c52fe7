//! CrudService: the schema-driven CRUD orchestrator.

mod crud;
pub use crud::CrudService;
