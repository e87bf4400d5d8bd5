//! Static word tables backing the built-in capabilities.
//!
//! Every language carries a stopword list (used for detection and for the
//! stopword flag on tokens). Languages with full support also carry the
//! adjective/verb lexicons, suffix rules and polarity words used by the
//! annotator and the sentiment predictor.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug)]
pub struct LanguageLexicon {
    pub code: &'static str,
    pub stopwords: HashSet<&'static str>,
    pub adjectives: HashSet<&'static str>,
    pub verbs: HashSet<&'static str>,
    pub adjective_suffixes: &'static [&'static str],
    pub verb_suffixes: &'static [&'static str],
    pub adverb_suffixes: &'static [&'static str],
    pub positive: HashSet<&'static str>,
    pub negative: HashSet<&'static str>,
    /// Characters whose presence hints at this language's orthography.
    pub markers: &'static [char],
}

impl LanguageLexicon {
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// True when the lexicon has more than a stopword list.
    pub fn has_grammar(&self) -> bool {
        !self.adjectives.is_empty() || !self.verb_suffixes.is_empty()
    }

    pub fn has_polarity(&self) -> bool {
        !self.positive.is_empty() || !self.negative.is_empty()
    }
}

static LEXICONS: Lazy<Vec<LanguageLexicon>> = Lazy::new(|| {
    vec![
        english(),
        portuguese(),
        spanish(),
        french(),
        german(),
        italian(),
    ]
});

pub fn all_lexicons() -> &'static [LanguageLexicon] {
    LEXICONS.as_slice()
}

pub fn lexicon(code: &str) -> Option<&'static LanguageLexicon> {
    LEXICONS.iter().find(|lexicon| lexicon.code == code)
}

/// Lowercased Unicode words of `text`, punctuation and whitespace dropped.
pub fn lowercase_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.unicode_words().map(str::to_lowercase)
}

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

fn english() -> LanguageLexicon {
    LanguageLexicon {
        code: "en",
        stopwords: set(&[
            "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
            "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
            "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
            "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
            "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
            "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no",
            "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
            "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
            "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
            "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
            "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
            "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
        ]),
        adjectives: set(&[
            "good", "great", "bad", "new", "old", "big", "small", "high", "low", "long", "short",
            "real", "true", "false", "best", "worst", "better", "worse", "happy", "sad", "nice",
            "cheap", "expensive", "hot", "cold", "free", "full", "easy", "hard", "local",
            "public", "young", "strong", "weak", "early", "late", "important", "common",
            "strange", "quick", "slow", "clean", "dirty", "safe", "dangerous", "wrong", "right",
        ]),
        verbs: set(&[
            "think", "know", "make", "get", "go", "want", "see", "say", "take", "come", "give",
            "find", "tell", "ask", "work", "seem", "feel", "try", "leave", "call", "need",
            "keep", "let", "begin", "help", "show", "hear", "play", "run", "move", "live",
            "believe", "buy", "pay", "love", "hate", "like",
        ]),
        adjective_suffixes: &["ful", "ous", "ive", "able", "ible", "less", "ical", "ish"],
        verb_suffixes: &["ing", "ed", "ize", "ise"],
        adverb_suffixes: &["ly"],
        positive: set(&[
            "good", "great", "excellent", "amazing", "awesome", "wonderful", "fantastic",
            "love", "like", "happy", "best", "better", "nice", "beautiful", "perfect", "glad",
            "thanks", "thank", "brilliant", "enjoy", "fun", "win", "success", "positive",
        ]),
        negative: set(&[
            "bad", "terrible", "awful", "horrible", "worst", "worse", "hate", "sad", "angry",
            "poor", "ugly", "disappointing", "fail", "failure", "problem", "wrong", "broken",
            "sucks", "annoying", "negative", "scam", "crisis", "expensive", "dangerous",
        ]),
        markers: &[],
    }
}

fn portuguese() -> LanguageLexicon {
    LanguageLexicon {
        code: "pt",
        stopwords: set(&[
            "a", "ao", "aos", "aquela", "aquele", "as", "até", "com", "como", "da", "das", "de",
            "dela", "dele", "do", "dos", "e", "ela", "ele", "eles", "em", "entre", "era", "essa",
            "esse", "esta", "está", "estão", "este", "eu", "foi", "há", "isso", "isto", "já",
            "lhe", "mais", "mas", "me", "mesmo", "meu", "minha", "muito", "na", "nas", "não",
            "nem", "no", "nos", "nós", "num", "numa", "o", "os", "ou", "para", "pela", "pelo",
            "por", "qual", "quando", "que", "quem", "se", "sem", "ser", "seu", "sua", "são",
            "também", "te", "tem", "têm", "tu", "um", "uma", "você", "vocês", "à", "às", "é",
            "estou", "tenho", "onde", "porque", "ainda", "depois", "sobre",
        ]),
        adjectives: set(&[
            "bom", "boa", "mau", "má", "novo", "nova", "velho", "velha", "grande", "pequeno",
            "pequena", "alto", "alta", "baixo", "baixa", "bonito", "bonita", "feliz", "triste",
            "caro", "cara", "barato", "barata", "melhor", "pior", "real", "verdadeiro", "falso",
            "quente", "frio", "fria", "lindo", "linda", "ótimo", "ótima", "péssimo", "péssima",
            "português", "portuguesa", "público", "pública", "difícil", "fácil",
        ]),
        verbs: set(&[
            "fazer", "ir", "ver", "dar", "dizer", "saber", "querer", "poder", "ficar", "viver",
            "gosto", "acho", "sei", "vou", "vai", "fiz", "faz", "pode", "quero",
        ]),
        adjective_suffixes: &["oso", "osa", "ável", "ível", "ivo", "iva", "ante", "ista"],
        verb_suffixes: &["ar", "er", "ir", "ando", "endo", "indo", "ado", "ido"],
        adverb_suffixes: &["mente"],
        positive: set(&[
            "bom", "boa", "ótimo", "ótima", "excelente", "lindo", "linda", "bonito", "bonita",
            "feliz", "adoro", "amo", "gosto", "melhor", "maravilhoso", "maravilhosa", "incrível",
            "obrigado", "obrigada", "fantástico", "fixe", "perfeito", "perfeita", "sucesso",
        ]),
        negative: set(&[
            "mau", "má", "péssimo", "péssima", "horrível", "terrível", "triste", "odeio", "pior",
            "problema", "problemas", "caro", "cara", "vergonha", "crise", "mal", "errado",
            "errada", "falha", "medo", "raiva", "roubo", "chato", "chata",
        ]),
        markers: &['ã', 'õ', 'ç', 'â', 'ê', 'ô'],
    }
}

fn spanish() -> LanguageLexicon {
    LanguageLexicon {
        code: "es",
        stopwords: set(&[
            "a", "al", "algo", "ante", "con", "contra", "cual", "cuando", "de", "del", "desde",
            "donde", "el", "él", "ella", "ellas", "ellos", "en", "entre", "era", "es", "esa",
            "ese", "eso", "esta", "está", "están", "este", "esto", "estoy", "fue", "ha", "hay",
            "la", "las", "le", "les", "lo", "los", "me", "mi", "mis", "muy", "más", "nada", "ni",
            "no", "nos", "nosotros", "o", "para", "pero", "poco", "por", "porque", "que", "qué",
            "se", "sin", "sobre", "son", "su", "sus", "también", "te", "tengo", "ti", "tu", "tú",
            "un", "una", "uno", "unos", "usted", "y", "ya", "yo", "hasta", "muy", "todo",
        ]),
        adjectives: set(&[
            "bueno", "buena", "malo", "mala", "nuevo", "nueva", "viejo", "vieja", "grande",
            "pequeño", "pequeña", "alto", "alta", "bajo", "baja", "bonito", "bonita", "feliz",
            "triste", "caro", "cara", "barato", "barata", "mejor", "peor", "real", "verdadero",
            "falso", "caliente", "frío", "fría", "lindo", "linda", "fácil", "difícil",
            "español", "española", "público", "pública",
        ]),
        verbs: set(&[
            "hacer", "ir", "ver", "dar", "decir", "saber", "querer", "poder", "vivir", "creo",
            "sé", "voy", "va", "hizo", "hace", "puede", "quiero",
        ]),
        adjective_suffixes: &["oso", "osa", "able", "ible", "ivo", "iva", "ante", "ista"],
        verb_suffixes: &["ar", "er", "ir", "ando", "iendo", "ado", "ido"],
        adverb_suffixes: &["mente"],
        positive: set(&[
            "bueno", "buena", "excelente", "genial", "lindo", "linda", "bonito", "bonita",
            "feliz", "encanta", "amo", "mejor", "maravilloso", "maravillosa", "increíble",
            "gracias", "fantástico", "perfecto", "perfecta", "éxito", "alegría",
        ]),
        negative: set(&[
            "malo", "mala", "pésimo", "pésima", "horrible", "terrible", "triste", "odio", "peor",
            "problema", "problemas", "caro", "cara", "vergüenza", "crisis", "mal", "error",
            "miedo", "rabia", "robo", "aburrido", "aburrida",
        ]),
        markers: &['ñ', '¿', '¡'],
    }
}

fn french() -> LanguageLexicon {
    detection_only(
        "fr",
        &[
            "au", "aux", "avec", "ce", "ces", "dans", "des", "du", "elle", "est", "et", "il",
            "ils", "je", "la", "le", "les", "leur", "mais", "mes", "moi", "mon", "ne", "nous",
            "ou", "par", "pas", "pour", "qui", "sa", "ses", "son", "sont", "sur", "ta", "toi",
            "ton", "tu", "un", "une", "vous", "c'est", "être", "avoir", "très",
        ],
        &['è', 'ê', 'à', 'ù', 'œ', 'ë', 'î'],
    )
}

fn german() -> LanguageLexicon {
    detection_only(
        "de",
        &[
            "aber", "als", "am", "auch", "auf", "aus", "bei", "bin", "bist", "das", "dass", "dem",
            "den", "der", "des", "die", "dir", "du", "ein", "eine", "einen", "er", "es", "für",
            "hat", "ich", "ihr", "im", "ist", "mit", "nicht", "noch", "sie", "sind", "und", "uns",
            "von", "war", "was", "wie", "wir", "zu", "zum", "zur",
        ],
        &['ä', 'ö', 'ü', 'ß'],
    )
}

fn italian() -> LanguageLexicon {
    detection_only(
        "it",
        &[
            "che", "chi", "ci", "con", "da", "dei", "del", "della", "di", "gli", "ha", "il", "io",
            "la", "le", "lei", "lo", "loro", "lui", "ma", "mi", "nel", "nella", "noi", "non",
            "per", "più", "questo", "sono", "su", "ti", "tu", "un", "una", "uno", "voi", "anche",
            "perché", "molto", "sei", "siamo",
        ],
        &['ì', 'ò'],
    )
}

fn detection_only(
    code: &'static str,
    stopwords: &[&'static str],
    markers: &'static [char],
) -> LanguageLexicon {
    LanguageLexicon {
        code,
        stopwords: set(stopwords),
        adjectives: HashSet::new(),
        verbs: HashSet::new(),
        adjective_suffixes: &[],
        verb_suffixes: &[],
        adverb_suffixes: &[],
        positive: HashSet::new(),
        negative: HashSet::new(),
        markers,
    }
}
