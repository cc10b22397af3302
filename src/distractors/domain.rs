use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::distractors::{DOMAIN_CONFIDENCE, DOMAIN_SCORE};
use crate::data::{CandidateSource, DistractorCandidate};
use crate::errors::QuizError;
use crate::patterns::{KeywordMatcher, MatcherRegistry};

/// Subject area with a fixed distractor vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Lab and physical-science terms.
    Science,
    /// Political and social history terms.
    History,
    /// Literary devices.
    Literature,
    /// Algebra and calculus terms.
    Mathematics,
    /// Protocols, devices, and OSI layers.
    Networking,
    /// Languages and language constructs.
    Programming,
    /// Data structures and complexity.
    ComputerScience,
    /// General computing products and platforms.
    Technology,
}

impl Domain {
    /// Every built-in domain, in inference tie-break order.
    pub const ALL: [Domain; 8] = [
        Domain::Science,
        Domain::History,
        Domain::Literature,
        Domain::Mathematics,
        Domain::Networking,
        Domain::Programming,
        Domain::ComputerScience,
        Domain::Technology,
    ];

    /// Stable snake_case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Science => "science",
            Domain::History => "history",
            Domain::Literature => "literature",
            Domain::Mathematics => "mathematics",
            Domain::Networking => "networking",
            Domain::Programming => "programming",
            Domain::ComputerScience => "computer_science",
            Domain::Technology => "technology",
        }
    }

    fn vocabulary(self) -> &'static [&'static str] {
        match self {
            Domain::Science => SCIENCE,
            Domain::History => HISTORY,
            Domain::Literature => LITERATURE,
            Domain::Mathematics => MATHEMATICS,
            Domain::Networking => NETWORKING,
            Domain::Programming => PROGRAMMING,
            Domain::ComputerScience => COMPUTER_SCIENCE,
            Domain::Technology => TECHNOLOGY,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = QuizError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Domain::ALL
            .into_iter()
            .find(|domain| domain.as_str() == normalized)
            .ok_or_else(|| QuizError::Configuration(format!("unknown domain '{value}'")))
    }
}

const SCIENCE: &[&str] = &[
    "hypothesis", "theory", "experiment", "observation", "analysis", "synthesis", "catalyst",
    "reaction", "element", "compound", "molecule", "atom", "electron", "proton", "neutron",
];

const HISTORY: &[&str] = &[
    "revolution", "empire", "dynasty", "civilization", "monarchy", "democracy", "republic",
    "conquest", "treaty", "alliance", "war", "peace", "culture", "society", "economy",
];

const LITERATURE: &[&str] = &[
    "metaphor", "symbolism", "allegory", "irony", "theme", "plot", "character", "setting",
    "narrative", "conflict", "climax", "resolution", "protagonist", "antagonist", "dialogue",
];

const MATHEMATICS: &[&str] = &[
    "equation", "function", "variable", "constant", "coefficient", "polynomial", "derivative",
    "integral", "limit", "theorem", "proof", "axiom", "formula", "algorithm", "matrix",
];

const NETWORKING: &[&str] = &[
    "protocol", "packet", "router", "switch", "hub", "gateway", "firewall", "bandwidth",
    "latency", "throughput", "topology", "ethernet", "wifi", "bluetooth", "TCP", "UDP", "HTTP",
    "HTTPS", "FTP", "SMTP", "DNS", "DHCP", "ICMP", "ARP", "BGP", "physical", "data link",
    "network", "transport", "session", "presentation", "application", "modem", "access point",
    "bridge", "repeater",
];

const PROGRAMMING: &[&str] = &[
    "algorithm", "function", "variable", "loop", "condition", "array", "object", "class",
    "method", "parameter", "Python", "Java", "JavaScript", "Ruby", "PHP", "Rust", "Swift",
    "list", "dictionary", "set", "tuple", "queue", "stack", "tree", "graph", "heap",
    "procedural", "object-oriented", "functional", "declarative", "imperative",
];

const COMPUTER_SCIENCE: &[&str] = &[
    "algorithm", "complexity", "recursion", "iteration", "optimization", "hashing", "encryption",
    "compression", "array", "linked list", "binary tree", "hash table", "graph", "heap", "stack",
    "queue", "sorting", "searching", "traversal", "shortest path", "minimum spanning tree",
    "dynamic programming", "polynomial", "exponential", "logarithmic",
];

const TECHNOLOGY: &[&str] = &[
    "system", "process", "service", "application", "platform", "framework", "architecture",
    "infrastructure", "hardware", "software", "firmware", "middleware", "database", "server",
    "client", "cloud", "implementation", "deployment", "configuration", "optimization",
    "monitoring", "maintenance", "scalable", "reliable", "secure", "efficient", "robust",
    "flexible", "maintainable",
];

/// Domain vocabularies used both to infer a text's subject area and as
/// distractor pools.
pub struct DomainVocabularies {
    registry: MatcherRegistry<Domain>,
}

impl Default for DomainVocabularies {
    fn default() -> Self {
        let mut registry = MatcherRegistry::new();
        for domain in Domain::ALL {
            registry.register(
                domain,
                Box::new(KeywordMatcher::new(domain.as_str(), domain.vocabulary())),
            );
        }
        Self { registry }
    }
}

impl DomainVocabularies {
    /// Mutable access for registering or removing vocabularies.
    pub fn registry_mut(&mut self) -> &mut MatcherRegistry<Domain> {
        &mut self.registry
    }

    /// Vocabulary registered for `domain`; empty when none is.
    pub fn pool(&self, domain: Domain) -> &[String] {
        self.registry
            .get(domain)
            .map(|matcher| matcher.vocabulary())
            .unwrap_or(&[])
    }

    /// Domain whose vocabulary appears most often in `text`.
    pub fn infer(&self, text: &str) -> Option<Domain> {
        self.registry.best_match(text).map(|(domain, _)| domain)
    }

    /// The explicit domain when it names a known one, else the inferred domain.
    pub fn resolve(&self, explicit: Option<&str>, context: &str) -> Option<Domain> {
        explicit
            .and_then(|name| name.parse::<Domain>().ok())
            .or_else(|| self.infer(context))
    }
}

/// Samples terms from the resolved domain's vocabulary.
pub fn generate<R: Rng + ?Sized>(
    vocabularies: &DomainVocabularies,
    answer: &str,
    context: &str,
    domain: Option<&str>,
    count: usize,
    rng: &mut R,
) -> Vec<DistractorCandidate> {
    let Some(domain) = vocabularies.resolve(domain, context) else {
        return Vec::new();
    };
    let pool: Vec<&String> = vocabularies
        .pool(domain)
        .iter()
        .filter(|term| !term.eq_ignore_ascii_case(answer))
        .collect();
    let wanted = (count / 2).max(1).min(pool.len());
    debug!(
        "[quizgen:distractors] sampling {wanted} terms from the {domain} pool for '{answer}'"
    );
    pool.choose_multiple(rng, wanted)
        .map(|term| {
            DistractorCandidate::new(
                term.as_str(),
                DOMAIN_SCORE,
                CandidateSource::Domain,
                DOMAIN_CONFIDENCE,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn domain_names_round_trip_through_from_str() {
        for domain in Domain::ALL {
            assert_eq!(domain.as_str().parse::<Domain>().unwrap(), domain);
        }
        assert_eq!(
            "Computer Science".parse::<Domain>().unwrap(),
            Domain::ComputerScience
        );
        assert!("astrology".parse::<Domain>().is_err());
    }

    #[test]
    fn networking_text_infers_networking() {
        let vocabularies = DomainVocabularies::default();
        let text = "A router and a firewall sit between the gateway and the modem.";
        assert_eq!(vocabularies.infer(text), Some(Domain::Networking));
        assert_eq!(vocabularies.infer("nothing relevant"), None);
    }

    #[test]
    fn explicit_domain_wins_over_inference() {
        let vocabularies = DomainVocabularies::default();
        let text = "A router forwards packets.";
        assert_eq!(
            vocabularies.resolve(Some("history"), text),
            Some(Domain::History)
        );
        assert_eq!(
            vocabularies.resolve(Some("unknown"), text),
            Some(Domain::Networking)
        );
    }

    #[test]
    fn pool_sampling_excludes_the_answer() {
        let vocabularies = DomainVocabularies::default();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picks = generate(&vocabularies, "Theory", "", Some("science"), 6, &mut rng);
            assert_eq!(picks.len(), 3);
            assert!(picks.iter().all(|pick| !pick.text.eq_ignore_ascii_case("theory")));
            assert!(picks.iter().all(|pick| pick.source == CandidateSource::Domain));
        }
    }

    #[test]
    fn unknown_domain_without_context_contributes_nothing() {
        let vocabularies = DomainVocabularies::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(&vocabularies, "Photosynthesis", "", None, 3, &mut rng).is_empty());
    }

    #[test]
    fn pools_drop_case_insensitive_duplicates() {
        let vocabularies = DomainVocabularies::default();
        let pool = vocabularies.pool(Domain::Networking);
        let routers = pool.iter().filter(|term| term.as_str() == "router").count();
        assert_eq!(routers, 1);
    }
}
