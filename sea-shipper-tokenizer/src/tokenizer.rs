use std::{collections::HashMap, sync::Arc};

use crate::{State, Token, Tokens, Transition, TransitionKind, TransitionTable};

#[derive(Debug, Clone)]
/// Runs a [`TransitionTable`] over byte input.
///
/// The table is shared behind an `Arc`, so a `Tokenizer` is cheap to clone and can be used from
/// many threads at once. Tokenization holds no state across calls.
pub struct Tokenizer<S: State> {
    table: Arc<TransitionTable<S>>,
}

/// The transition that fires next, and where its trigger sits in the input.
struct Match<'t, S: State> {
    transition: &'t Transition<S>,
    start: usize,
    end: usize,
}

impl<S: State> Tokenizer<S> {
    pub fn new(table: TransitionTable<S>) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &TransitionTable<S> {
        &self.table
    }

    /// Tokenize `input` beginning in state `start`. Bytes after the last consumed trigger
    /// are not returned; see [`Tokenizer::tokenize_partial`] to inspect them.
    pub fn tokenize<'a>(&self, input: &'a [u8], start: S) -> Vec<Token<'a, S>> {
        self.tokenize_partial(input, start).into_vec()
    }

    /// Tokenize `input` beginning in state `start`, keeping the unconsumed residue.
    ///
    /// Scanning stops without error when the current state has no transition whose trigger
    /// occurs in the remaining input, or when the state has no transitions at all. A `start`
    /// state unknown to the table therefore yields no tokens.
    pub fn tokenize_partial<'a>(&self, input: &'a [u8], start: S) -> Tokens<'a, S> {
        let mut tokens = Vec::new();
        let mut occurrences = Occurrences::default();
        let mut state = start;
        let mut pos = 0;

        while pos < input.len() {
            let transitions = match self.table.transitions(&state) {
                Some(transitions) => transitions,
                None => break,
            };
            let next = match earliest_match(state, transitions, input, pos, &mut occurrences) {
                Some(next) => next,
                None => break,
            };
            match next.transition.kind() {
                TransitionKind::Emit => {
                    tokens.push(Token::new(state, &input[pos..next.start]));
                }
                TransitionKind::RestartWithoutEmit => {}
            }
            state = next.transition.target();
            pos = next.end;
        }

        Tokens::new(tokens, &input[pos..])
    }
}

/// Where each trigger of the table occurs next, remembered for one tokenization pass.
///
/// The scan position only moves forward, so an occurrence at or after the current position is
/// still the next one, and a trigger absent from the rest of the input stays absent.
struct Occurrences<S: State> {
    next: HashMap<(S, usize), Option<usize>>,
}

impl<S: State> Default for Occurrences<S> {
    fn default() -> Self {
        Self {
            next: HashMap::new(),
        }
    }
}

impl<S: State> Occurrences<S> {
    fn find(
        &mut self,
        key: (S, usize),
        trigger: &[u8],
        input: &[u8],
        pos: usize,
    ) -> Option<usize> {
        match self.next.get(&key) {
            Some(None) => return None,
            Some(Some(start)) if *start >= pos => return Some(*start),
            _ => (),
        }
        let found = find(&input[pos..], trigger).map(|offset| pos + offset);
        self.next.insert(key, found);
        found
    }
}

/// Find the transition whose trigger occurs first at or after `pos`. Triggers starting at the
/// same offset are resolved in listed order.
fn earliest_match<'t, S: State>(
    state: S,
    transitions: &'t [Transition<S>],
    input: &[u8],
    pos: usize,
    occurrences: &mut Occurrences<S>,
) -> Option<Match<'t, S>> {
    let mut best: Option<Match<'t, S>> = None;
    for (index, transition) in transitions.iter().enumerate() {
        let trigger = transition.trigger();
        let start = match occurrences.find((state, index), trigger, input, pos) {
            Some(start) => start,
            None => continue,
        };
        // only a strictly earlier occurrence can replace the current best
        if matches!(&best, Some(best) if best.start <= start) {
            continue;
        }
        best = Some(Match {
            transition,
            start,
            end: start + trigger.len(),
        });
    }
    best
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    let first = needle[0];
    haystack
        .windows(needle.len())
        .position(|window| window[0] == first && window == needle)
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kv {
        Key,
        Value,
        Comment,
    }

    fn kv() -> Tokenizer<Kv> {
        let table = TransitionTable::new()
            .with(
                Kv::Key,
                [
                    Transition::emit("=", Kv::Value),
                    Transition::restart("#", Kv::Comment),
                ],
            )
            .unwrap()
            .with(Kv::Value, [Transition::emit(";", Kv::Key)])
            .unwrap()
            .with(Kv::Comment, [Transition::restart("\n", Kv::Key)])
            .unwrap();
        Tokenizer::new(table)
    }

    fn render<'a, S: State>(tokens: &[Token<'a, S>]) -> Vec<(S, &'a str)> {
        tokens
            .iter()
            .map(|t| (t.state(), t.as_str().unwrap()))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(kv().tokenize(b"", Kv::Key).is_empty());
        let tokens = kv().tokenize_partial(b"", Kv::Key);
        assert!(tokens.is_complete());
    }

    #[test]
    fn test_unknown_start_state() {
        let table = TransitionTable::new()
            .with(Kv::Key, [Transition::emit("=", Kv::Value)])
            .unwrap();
        let tokens = Tokenizer::new(table).tokenize_partial(b"a=b;", Kv::Comment);
        assert!(tokens.is_empty());
        assert_eq!(tokens.residue(), b"a=b;");
    }

    #[test]
    fn test_token_is_tagged_with_source_state() {
        let tokens = kv().tokenize(b"level=info;tag=web;", Kv::Key);
        assert_eq!(
            render(&tokens),
            [
                (Kv::Key, "level"),
                (Kv::Value, "info"),
                (Kv::Key, "tag"),
                (Kv::Value, "web"),
            ]
        );
    }

    #[test]
    fn test_residue() {
        let tokens = kv().tokenize_partial(b"level=info;tag=we", Kv::Key);
        assert_eq!(
            render(&tokens),
            [(Kv::Key, "level"), (Kv::Value, "info"), (Kv::Key, "tag")]
        );
        assert_eq!(tokens.residue(), b"we");
        assert!(!tokens.is_complete());
    }

    #[test]
    fn test_restart_discards_pending_bytes() {
        // "garbage" precedes the comment marker and must vanish along with the comment body
        let tokens = kv().tokenize(b"garbage# a comment\nlevel=info;", Kv::Key);
        assert_eq!(render(&tokens), [(Kv::Key, "level"), (Kv::Value, "info")]);
    }

    #[test]
    fn test_earliest_trigger_wins() {
        // '#' is listed after '=' but occurs first
        let tokens = kv().tokenize(b"#x=y\nk=v;", Kv::Key);
        assert_eq!(render(&tokens), [(Kv::Key, "k"), (Kv::Value, "v")]);
    }

    #[test]
    fn test_tie_goes_to_listed_order() {
        let table = TransitionTable::new()
            .with(
                0u8,
                [
                    Transition::emit("ab", 1),
                    Transition::emit("a", 2),
                    Transition::emit("abc", 3),
                ],
            )
            .unwrap();
        let tokens = Tokenizer::new(table).tokenize_partial(b"xabc", 0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].data(), b"x");
        assert_eq!(tokens.residue(), b"c");

        let table = TransitionTable::new()
            .with(0u8, [Transition::emit("a", 2), Transition::emit("ab", 1)])
            .unwrap()
            .with(2u8, [Transition::emit("c", 0)])
            .unwrap();
        let tokens = Tokenizer::new(table).tokenize_partial(b"xabc", 0);
        assert_eq!(render(&tokens), [(0, "x"), (2, "b")]);
        assert!(tokens.is_complete());
    }

    #[test]
    fn test_longer_trigger_later_does_not_win() {
        let table = TransitionTable::new()
            .with(0u8, [Transition::emit("\r\n", 0), Transition::emit("\n", 0)])
            .unwrap();
        let tokens = Tokenizer::new(table).tokenize(b"one\ntwo\r\nthree\n", 0);
        assert_eq!(render(&tokens), [(0, "one"), (0, "two"), (0, "three")]);
    }

    #[test]
    fn test_idempotent() {
        let tokenizer = kv();
        let input = b"a=1;b=2;#c\nd=3;";
        let first = tokenizer.tokenize_partial(input, Kv::Key);
        let second = tokenizer.tokenize_partial(input, Kv::Key);
        assert_eq!(first, second);
    }

    #[test]
    fn test_shared_across_threads() {
        let tokenizer = kv();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let tokenizer = tokenizer.clone();
                std::thread::spawn(move || {
                    let input = format!("key{i}=value{i};");
                    tokenizer
                        .tokenize(input.as_bytes(), Kv::Key)
                        .iter()
                        .map(|t| t.as_str().unwrap().to_owned())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(
                handle.join().unwrap(),
                [format!("key{i}"), format!("value{i}")]
            );
        }
    }

    #[test]
    fn test_many_records_with_absent_trigger() {
        let records = 20_000;
        let input = "k=v;".repeat(records);
        // the comment marker never occurs; every record must still be found
        let tokens = kv().tokenize_partial(input.as_bytes(), Kv::Key);
        assert_eq!(tokens.len(), records * 2);
        assert!(tokens.is_complete());
        assert!(tokens
            .chunks(2)
            .all(|pair| pair[0].data() == b"k" && pair[1].data() == b"v"));
    }

    #[test]
    fn test_stale_occurrence_is_searched_again() {
        // '=' is first seen inside the comment, which is consumed before any key is read
        let tokens = kv().tokenize(b"#a=b
#c=d
k=v;", Kv::Key);
        assert_eq!(render(&tokens), [(Kv::Key, "k"), (Kv::Value, "v")]);
    }
}
