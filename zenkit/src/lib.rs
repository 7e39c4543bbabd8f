//! zenkit is a typed client for the Zenkit list/database REST api.
//!
//! A [`Zenkit`] session resolves the logged in user and its workspaces. Collections are fetched lazily:
//! their schema ([`Element`]s) decides which typed [`Field`] view each attribute of an [`Entry`] gets,
//! edits are tracked per field and [`Entry::commit`] sends them as a single update.
//!
//! `zenkit_orm` (see [`orm`]) renders a collection schema into Rust source with named accessors and
//! label enums. Generated wrappers are plugged in through a [`CollectionRegistry`] so lookups hand
//! them back instead of the generic [`Collection`].
//!

pub mod access;
pub mod api;
pub mod collection;
pub mod comment;
pub mod config;
pub mod element;
pub mod entry;
pub mod error;
pub mod fields;
pub mod logger;
pub mod notification;
pub mod orm;
mod pattern;
pub mod record;
pub mod registry;
pub mod rest_client;
pub mod testing;
pub mod user;
pub mod webhook;
pub mod workspace;
pub mod zenkit;

pub use async_trait::async_trait;
pub use http;
pub use serde_json;

pub use access::{CollectionAccess, UserAccess, UserRef, UserRole};
pub use api::{Api, Response, Transport};
pub use collection::{Collection, CollectionInfo, EntryLookup, OrderBy, PopulateQuery, SortDirection};
pub use comment::{Activity, ActivityFilter, Comment, CommentScope};
pub use config::ZenkitConfig;
pub use element::{Element, ElementCategory, FieldKind, Label, ValueType};
pub use entry::Entry;
pub use error::ZenkitError;
pub use fields::{Field, FieldRef, LabelRef};
pub use notification::{Notification, ReadScope};
pub use orm::generate_orm;
pub use record::RawEntry;
pub use registry::{AnyCollection, BoundCollection, CollectionRegistry, TypedCollection};
pub use rest_client::HttpTransport;
pub use user::User;
pub use webhook::{TriggerType, Webhook, WebhookTarget};
pub use workspace::{Workspace, WorkspaceInfo};
pub use zenkit::Zenkit;
