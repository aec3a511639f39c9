//! # Lectern API
//!
//! A REST API built with Rust, Axum, and PostgreSQL for managing courses,
//! instructors and students, with JWT authentication across two realms.
//!
//! ## Overview
//!
//! Lectern provides a backend for course administration:
//!
//! - **Authentication**: JWT access tokens resolved against two credential
//!   stores, admin users and students, with refresh and revocation
//! - **Course Management**: CRUD with a soft-delete lifecycle
//!   (trash, restore, purge) for courses, instructors and students
//! - **Relationships**: instructors and students are linked to courses
//!   through join tables; an instructor's students are derived from the
//!   courses they share
//!
//! ## Architecture
//!
//! The codebase follows a modular architecture inspired by NestJS:
//!
//! ```text
//! src/
//! ├── cli/              # CLI commands (create-admin)
//! ├── config/           # Configuration (JWT, database)
//! ├── middleware/       # Auth extractors
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login, refresh, logout, current identity
//! │   ├── courses/     # Course management
//! │   ├── instructors/ # Instructor management
//! │   └── students/    # Student management
//! └── utils/            # Shared utilities
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: Business logic
//! - `model.rs`: Data models, DTOs, database structs
//! - `router.rs`: Axum router configuration
//!
//! ## Authentication
//!
//! Login probes the student store first, then the admin store, so one
//! endpoint serves both realms. Tokens carry the realm they were issued
//! under and a `jti` that logout writes to a revocation table. Reads
//! require any authenticated subject; mutations additionally require an
//! admin-realm token whose user still has the admin flag.
//!
//! ## Security Considerations
//!
//! - Passwords are hashed using bcrypt
//! - JWT secrets should be cryptographically random
//! - Admin accounts cannot be created via API (CLI only)
//! - Password hashes are never selected into response models

pub mod cli;
pub mod config;
pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
