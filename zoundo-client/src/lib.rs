pub mod assets;
pub mod client;
pub mod config;
pub mod notifications;
pub mod performers;
pub mod tracks;
pub mod types;
pub mod users;

pub use assets::Assets;
pub use client::ZoundoClient;
pub use config::Config;
pub use notifications::Notifications;
pub use performers::Performers;
pub use tracks::Tracks;
pub use users::Users;

// Re-export transport types for convenience
pub use rest_client::{ApiError, Form, HttpError, HttpMethod, Payload};
pub use types::{
    fields, Asset, LoginRequest, LoginResponse, NewTrack, Notification, PagedData, Passport,
    Performer, PerformerProfile, PerformersQuery, ReviewStatus, SortOrder, Track, TrackUpdate,
    TracksQuery, User, UserRole, UserStatus,
};
