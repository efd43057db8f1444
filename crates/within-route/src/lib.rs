//! `within-route` — path search, instruction synthesis, and recommendation.
//!
//! # Request flow
//!
//! ```text
//! RouteInput (start, end coordinates)
//!   ① Snap      — TransportNetwork::nearest_node for both ends
//!   ② Search    — RoutePlanner::find_route (A* by default) → Vec<NodeId>
//!   ③ Annotate  — one (street, metres, direction) segment per path edge
//!   ④ Merge     — fold consecutive segments sharing street AND direction
//!   ⑤ Describe  — "Continue {direction} on {street} for approximately N meters."
//!   ⑥ Summarize — optional RouteSummarizer pass over the description
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `RouteRecommender::recommend_many` runs on Rayon.        |
//! | `serde`    | `Serialize` on `RouteOutput`, `Directions`, segments.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use within_network::CsvGraphSource;
//! use within_route::{AStarPlanner, RouteInput, RouteRecommender};
//!
//! let mut rec = RouteRecommender::new(CsvGraphSource::new("nodes.csv", "edges.csv"), AStarPlanner);
//! rec.initialize_network()?;
//! let out = rec.recommend(&RouteInput::new(30.2672, -97.7431, 30.2814, -97.7410)?)?;
//! println!("{}", out.text_instructions);
//! ```

pub mod error;
pub mod instructions;
pub mod planner;
pub mod recommender;
pub mod summarizer;


pub use error::{RouteError, RouteResult};
pub use instructions::{Directions, InstructionSegment, annotate_path, merge_segments, synthesize};
pub use planner::{AStarPlanner, Path, RoutePlanner, path_cost};
pub use recommender::{NO_ROUTE_MESSAGE, RouteInput, RouteOutput, RouteRecommender};
pub use summarizer::{PassThroughSummarizer, RouteSummarizer};
