mod comparison;
pub use comparison::{Comparison, ScoredPair};

mod embedding;
pub use embedding::{Embedding, EmbeddingSet};

mod error;
pub use error::CompareError;

mod similarity;
pub use similarity::{ComparisonOptions, SimilarityMetric, dot_product, similarity_score};
