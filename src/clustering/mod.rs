//! Clustering core: cosine distance, the agglomerative engine, the
//! distance-matrix cache, and representative selection.

mod cache;
mod distance;
mod engine;
mod select;
mod types;

pub use cache::{CacheKey, DiskCache, DistanceCache, NoopCache};
pub use distance::{cosine_distance, cosine_distance_slice, pairwise_distances};
pub use engine::{ClusterEngine, ClusterPolicy};
pub use select::{group_clusters, select_representatives};
pub use types::{round_confidence, Cluster, Representative};
