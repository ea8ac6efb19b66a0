//! Symbol frequency analysis.
//!
//! A `FrequencyTable` counts how often each symbol occurs. Entries keep the
//! order in which symbols first appear in the text; the tree builder uses that
//! order to break ties between equal weights, so the same text always yields
//! the same code table.

use std::collections::HashMap;

/// Mapping symbol -> occurrence count, built once and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    /// (symbol, count) in first-appearance order
    entries: Vec<(char, u64)>,
    /// symbol -> index into `entries`
    index: HashMap<char, usize>,
    /// Sum of all counts
    total: u64,
}

impl FrequencyTable {
    /// Count every symbol of `text`.
    pub fn from_symbols(text: &[char]) -> Self {
        let mut table = Self::default();
        for &symbol in text {
            match table.index.get(&symbol) {
                Some(&i) => table.entries[i].1 += 1,
                None => {
                    table.index.insert(symbol, table.entries.len());
                    table.entries.push((symbol, 1));
                }
            }
            table.total += 1;
        }
        table
    }

    /// Count of `symbol`, or 0 if it never occurs.
    pub fn get(&self, symbol: char) -> u64 {
        self.index
            .get(&symbol)
            .map_or(0, |&i| self.entries[i].1)
    }

    /// Number of distinct symbols.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate (symbol, count) pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<char> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let symbols: Vec<char> = iter.into_iter().collect();
        Self::from_symbols(&symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let table: FrequencyTable = "aabbbcc".chars().collect();
        assert_eq!(table.get('a'), 2);
        assert_eq!(table.get('b'), 3);
        assert_eq!(table.get('c'), 2);
        assert_eq!(table.get('z'), 0);
        assert_eq!(table.distinct(), 3);
        assert_eq!(table.total(), 7);
    }

    #[test]
    fn test_first_appearance_order() {
        let table: FrequencyTable = "cabcab".chars().collect();
        let order: Vec<char> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec!['c', 'a', 'b']);
    }

    #[test]
    fn test_empty() {
        let table = FrequencyTable::from_symbols(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }
}
