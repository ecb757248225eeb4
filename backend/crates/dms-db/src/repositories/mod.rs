pub mod document_repository;
