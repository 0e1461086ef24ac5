mod model;
mod repository;

pub use model::AppDocumentDB;
pub use repository::DocumentRepository;
