//! Per-note phoneme token rewrites ahead of syllabification.

use crate::config::ResolverConfig;
use crate::normalizer::AliasNormalizer;
use crate::oracle::AliasOracle;
use crate::phonetics::Inventory;
use crate::session::MissingTiers;
use crate::syllable::Tone;
use tracing::trace;

const GEMINATES: &[&str] = &[
    "bb", "dd", "ff", "gg", "jj", "kk", "ll", "mm", "nn", "pp", "rr", "ss", "tt", "vv", "ww", "yy", "zz",
];
const GEMINATE_DIGRAPHS: &[&str] = &["cch", "ddh", "hhh", "jjh", "ssh", "tth", "zzh"];
const CLOSING_DIPHTHONGS: &[&str] = &["ay", "ey", "oy", "ow", "aw"];
const CODAS: &[&str] = &["l", "m", "n", "r", "mm", "nn", "ng"];

/// Vowels that are never read as vowel + coda
const PLAIN_VOWELS: &[&str] = &[
    "aa", "ax", "ae", "ah", "ao", "aw", "ay", "eh", "er", "ey", "ih", "iy", "ow", "oy", "uh", "uw",
];

/// Token rewriter bound to one voice
pub struct TokenNormalizer<'a, O: ?Sized> {
    oracle: &'a O,
    normalizer: AliasNormalizer<'static>,
    inventory: &'static Inventory,
}

impl<'a, O: AliasOracle + ?Sized> TokenNormalizer<'a, O> {
    /// Rewriter probing `oracle` with the given tiers
    pub fn new(oracle: &'a O, tiers: MissingTiers) -> Self {
        Self {
            oracle,
            normalizer: AliasNormalizer::new(tiers),
            inventory: Inventory::english(),
        }
    }

    fn has(&self, alias: &str, tone: Tone) -> bool {
        self.oracle.exists(alias, tone) || self.oracle.exists(&self.normalizer.validate(alias), tone)
    }

    /// Rewrite every token; the output may be longer than the input
    pub fn normalize<S: AsRef<str>>(&self, tokens: &[S], tone: Tone) -> Vec<String> {
        let mut out = Vec::with_capacity(tokens.len());
        for token in tokens {
            let token = token.as_ref();
            match self.rewrite(token, tone) {
                Some(parts) => {
                    trace!(token, ?parts, "Split token");
                    out.extend(parts);
                }
                None => out.push(token.to_string()),
            }
        }
        out
    }

    /// Tokens for one note. A rest lyric is kept verbatim and a lone `r`
    /// lyric becomes a rest.
    pub fn normalize_note<S: AsRef<str>>(
        &self,
        lyric: &str,
        tokens: &[S],
        tone: Tone,
        config: &ResolverConfig,
    ) -> Vec<String> {
        if config.is_rest(lyric) {
            return vec![lyric.to_string()];
        }
        if lyric.eq_ignore_ascii_case("r") {
            return vec!["-".to_string()];
        }
        self.normalize(tokens, tone)
    }

    fn rewrite(&self, token: &str, tone: Tone) -> Option<Vec<String>> {
        let pair = |a: &str, b: &str| Some(vec![a.to_string(), b.to_string()]);
        match token {
            "dr" => pair("jh", "r"),
            "tr" => pair("ch", "r"),
            "ie" => pair("i", "e"),
            t if GEMINATES.contains(&t) => pair(&format!("_{}", &t[..1]), &t[1..]),
            t if GEMINATE_DIGRAPHS.contains(&t) => pair(&format!("_{}", &t[1..]), &t[1..]),
            "wh" if !self.has("wh", tone) && !self.has("ay wh", tone) => pair("hh", "h"),
            t if CLOSING_DIPHTHONGS.contains(&t) => pair(&t[..1], &t[1..]),
            t => {
                let (vowel, coda) = self.vowel_coda(t)?;
                let unsplit = self.has(&format!("b {t}"), tone) || self.has(t, tone);
                (!unsplit).then(|| vec![vowel.to_string(), coda.to_string()])
            }
        }
    }

    /// Split a fused vowel + coda token at its longest vowel prefix
    fn vowel_coda<'t>(&self, token: &'t str) -> Option<(&'t str, &'t str)> {
        if PLAIN_VOWELS.contains(&token) || !token.is_ascii() {
            return None;
        }
        (1..token.len())
            .rev()
            .map(|at| token.split_at(at))
            .find(|(vowel, coda)| self.inventory.is_vowel(vowel) && CODAS.contains(coda))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::AliasSet;
    use rstest::rstest;

    fn normalize(voice: &AliasSet, tokens: &[&str]) -> Vec<String> {
        TokenNormalizer::new(voice, MissingTiers::NONE).normalize(tokens, 60)
    }

    #[rstest]
    #[case(&["dr", "ay"], &["jh", "r", "a", "y"])]
    #[case(&["tr", "iy"], &["ch", "r", "iy"])]
    #[case(&["ie"], &["i", "e"])]
    #[case(&["kk", "ah"], &["_k", "k", "ah"])]
    #[case(&["ssh"], &["_sh", "sh"])]
    #[case(&["wh"], &["hh", "h"])]
    #[case(&["ow"], &["o", "w"])]
    #[case(&["k", "ae", "t"], &["k", "ae", "t"])]
    fn test_unconditional_rewrites(#[case] input: &[&str], #[case] expected: &[&str]) {
        assert_eq!(normalize(&AliasSet::new(), input), expected);
    }

    #[test]
    fn test_vowel_coda_split_is_last_resort() {
        let empty = AliasSet::new();
        assert_eq!(normalize(&empty, &["ang"]), vec!["a", "ng"]);
        assert_eq!(normalize(&empty, &["aar"]), vec!["aa", "r"]);
        assert_eq!(normalize(&empty, &["er"]), vec!["er"]);

        let probed: AliasSet = ["b ang"].into_iter().collect();
        assert_eq!(normalize(&probed, &["ang"]), vec!["ang"]);
        let bare: AliasSet = ["aar"].into_iter().collect();
        assert_eq!(normalize(&bare, &["aar"]), vec!["aar"]);
    }

    #[test]
    fn test_registered_wh_is_kept() {
        let voice: AliasSet = ["ay wh"].into_iter().collect();
        assert_eq!(normalize(&voice, &["wh"]), vec!["wh"]);
    }

    #[test]
    fn test_note_rest_bypass() {
        let voice = AliasSet::new();
        let normalizer = TokenNormalizer::new(&voice, MissingTiers::NONE);
        let config = ResolverConfig::default();
        assert_eq!(normalizer.normalize_note("R", &["r"], 60, &config), vec!["R"]);
        assert_eq!(normalizer.normalize_note("-", &["ah"], 60, &config), vec!["-"]);
        assert_eq!(normalizer.normalize_note("r", &["r"], 60, &config), vec!["-"]);
        assert_eq!(normalizer.normalize_note("tree", &["tr", "iy"], 60, &config), vec!["ch", "r", "iy"]);
    }
}
