mod provider;
mod seeded_provider;

pub use provider::ReferenceDataProvider;
pub use seeded_provider::SeededReferenceProvider;
