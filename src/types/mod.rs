// Type definitions: database entities, API DTOs, internal types
pub mod db;
pub mod dto;
pub mod internal;
