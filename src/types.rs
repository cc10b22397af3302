/// Raw document text handed to the extractors.
/// Example: `A router is a networking device that forwards data packets.`
pub type SourceText = String;
/// Sentence text produced by the sentence splitter.
/// Example: `Routers forward packets between networks.`
pub type Sentence = String;
/// Subject of a mined fact.
/// Examples: `A router`, `Photosynthesis`
pub type Subject = String;
/// Answer or distractor text before option normalization.
/// Examples: `Router`, `Alternative to Router`
pub type AnswerText = String;
/// Normalized option text shown to the learner.
/// Examples: `Router`, `Gateway`
pub type OptionText = String;
/// Option letter key.
/// Examples: `A`, `D`
pub type OptionLetter = char;
/// Name of a domain vocabulary or question category.
/// Examples: `networking`, `science`, `general`
pub type DomainName = String;
/// Issue category label used by the validator.
/// Examples: `Grammar`, `Clarity`, `Distractors`
pub type IssueCategory = String;
/// Dense embedding vector returned by a similarity model.
pub type Embedding = Vec<f32>;
