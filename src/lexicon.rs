//! Trigger words, prefixes, and patterns the classifier matches against.
//!
//! The lexicon is plain data. [`Lexicon::default`] is tuned for Indonesian
//! elementary-school textbooks (Kurikulum Merdeka style: "Ayo Mencoba",
//! "Mari Refleksikan", "Kosakata Baru"); other languages or grade levels
//! supply their own, in full or as a partial JSON override:
//!
//! ```rust
//! use bilah::Lexicon;
//!
//! let lexicon = Lexicon::from_json(r#"{ "prompt_words": ["did you know"] }"#).unwrap();
//! assert_eq!(lexicon.prompt_words, vec!["did you know"]);
//! // Fields not named keep their defaults.
//! assert!(lexicon.imperative_verbs.iter().any(|v| v == "amati"));
//! ```
//!
//! Every entry is compared against lowercased, normalized text. How each list
//! is matched (whole first token, line prefix, substring, whole word) is
//! documented on its field.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Closed word lists and patterns driving cue classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Imperative verbs, matched as a whole token (also with `-lah` removed).
    pub imperative_verbs: Vec<String>,
    /// Verb stems: a first token starting with one of these opens an instruction.
    pub imperative_prefixes: Vec<String>,
    /// Exhortation markers that open an instruction when they are the first token.
    pub imperative_markers: Vec<String>,
    /// Emphatic suffix stripped before verb lookup.
    pub imperative_suffix: String,
    /// Substrings marking exercises and questions.
    pub evaluative_triggers: Vec<String>,
    /// Substrings marking reflection headings.
    pub reflection_triggers: Vec<String>,
    /// Substrings marking discourse openers addressed to the reader.
    pub prompt_words: Vec<String>,
    /// Line prefixes of activity headings.
    pub activity_prefixes: Vec<String>,
    /// Line prefixes of glossary headings.
    pub glossary_prefixes: Vec<String>,
    /// Chapter/topic words, matched as `^<word>\s+\w+`.
    pub chapter_prefixes: Vec<String>,
    /// Question words, matched right after a list number.
    pub question_words: Vec<String>,
    /// Connectors that open a continued step or the tail of a broken sentence.
    pub continuation_prefixes: Vec<String>,
    /// Copula and naming connectives, matched as whole words.
    pub definition_keywords: Vec<String>,
    /// Cause/effect connectives, matched as whole words.
    pub cause_effect_connectives: Vec<String>,
    /// Example connectives, matched as whole words.
    pub example_connectives: Vec<String>,
    /// Narrative connectives, matched as whole words.
    pub narrative_connectives: Vec<String>,
    /// Case-insensitive regular expressions for boilerplate.
    pub meta_patterns: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            imperative_verbs: words(&[
                "amati", "amatilah", "perhatikan", "lakukan", "siapkan", "diskusikan",
                "tuliskan", "tulis", "jawablah", "jawab", "sebutkan", "urutkan", "pasangkan",
                "buatlah", "buat", "bacalah", "baca", "cermati", "pahami", "gunakan",
                "kerjakan", "cobalah", "coba", "tentukan", "prediksi", "isilah",
                "catat", "catatlah", "ambil", "ambillah", "letakkan", "masukkan", "tempelkan",
                "potong", "guntinglah", "warnai", "tunjukkan", "simpulkan", "sajikan",
                "bandingkan", "kelompokkan",
            ]),
            imperative_prefixes: words(&[
                "jelaskan", "ceritakan", "gambarkan", "hitung", "lingkari", "tandai", "carilah",
            ]),
            imperative_markers: words(&["ayo"]),
            imperative_suffix: "lah".to_string(),
            evaluative_triggers: words(&[
                "latihan", "soal", "ujian", "asesmen", "uji pemahaman",
                "jawablah", "isilah", "pasangkan", "urutkan", "pilihlah",
                "lengkapilah", "teka-teki silang", "diagram venn",
            ]),
            reflection_triggers: words(&["refleksi"]),
            prompt_words: words(&[
                "tahukah", "yuk", "mari", "pernahkah", "selamat belajar", "masih ingat",
            ]),
            activity_prefixes: words(&[
                "lakukan bersama", "mari mencoba", "mari refleksikan", "mari refleksi",
                "ayo mencoba", "ayo berdiskusi", "ayo bereksplorasi", "belajar lebih lanjut",
                "proyek belajar",
            ]),
            glossary_prefixes: words(&["kosakata baru", "glosarium", "kamus kecil"]),
            chapter_prefixes: words(&["bab", "topik", "subbab", "unit"]),
            question_words: words(&[
                "apa", "apakah", "siapa", "mengapa", "kenapa", "bagaimana", "kapan",
                "di mana", "dimana", "ke mana", "berapa", "manakah",
            ]),
            continuation_prefixes: words(&[
                "dan", "lalu", "kemudian", "setelah itu", "selanjutnya", "serta", "atau",
                "tetapi", "sedangkan", "hingga", "sampai", "agar", "supaya", "jika", "terakhir",
            ]),
            definition_keywords: words(&["adalah", "merupakan", "yaitu", "yakni", "disebut"]),
            cause_effect_connectives: words(&[
                "karena", "sehingga", "oleh karena itu", "akibatnya", "menyebabkan",
            ]),
            example_connectives: words(&["misalnya", "contohnya", "seperti", "sebagai contoh"]),
            narrative_connectives: words(&[
                "dahulu", "suatu hari", "kemudian", "tinggallah", "pada zaman",
            ]),
            meta_patterns: words(&[
                r"\bisbn\b",
                r"\b97[89][-\s]?\d{1,5}[-\s]\d{1,7}[-\s]\d{1,7}[-\s][\dx]\b",
                r"\be-?issn\b",
                r"\bhak cipta\b",
                r"\bcopyright\b",
                r"©",
                r"\bdilindungi undang-undang\b",
                r"\bkementerian pendidikan\b",
                r"\bkemendikbud(?:ristek)?\b",
                r"\bbadan standar, kurikulum\b",
                r"\bpusat perbukuan\b",
                r"\bditerbitkan oleh\b",
                r"\bpenerbit\s*:",
                r"\bcetakan ke-?\d+\b",
            ]),
        }
    }
}

impl Lexicon {
    /// Parse a (possibly partial) lexicon from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the JSON does not describe a lexicon.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the lists the classifier cannot do without.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLexiconField`] naming the first empty required list.
    pub fn validate(&self) -> Result<()> {
        if self.imperative_verbs.iter().all(|v| v.trim().is_empty()) {
            return Err(Error::EmptyLexiconField("imperative_verbs"));
        }
        if self.chapter_prefixes.iter().all(|v| v.trim().is_empty()) {
            return Err(Error::EmptyLexiconField("chapter_prefixes"));
        }
        Ok(())
    }
}
