//! Domain layer: view-model entities and pure transformations
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod broadcast;
pub mod builder;
pub mod category;
pub mod contrast;
pub mod countdown;
pub mod error;
pub mod presenter;
pub mod status_page;
pub mod tag;

pub use arena::{CategoryArena, NodeData};
pub use broadcast::{present_broadcasts, Broadcast, BroadcastRow, BroadcastStatus};
pub use builder::ForestBuilder;
pub use category::{count_nodes, validate_forest, CategoryNode, CategoryRecord};
pub use contrast::{contrasting_text_color, HexColor};
pub use countdown::Countdown;
pub use error::{DomainError, DomainResult};
pub use presenter::{present, present_view, toggle, ExpansionState, Row, RowDescriptor, TreeView};
pub use status_page::{Forbidden, Maintenance, RateLimited, RenderedPage, StatusPage};
pub use tag::{present_tags, Tag, TagRow};
