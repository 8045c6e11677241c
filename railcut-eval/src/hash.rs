// Open-addressed hash used to canonicalise wide cofactor columns: the table
// maps a column to the index of its first appearance, so scanning a truth
// table assigns indices 0, 1, 2, ... in first-occurrence order. The table is
// reset by walking the list of touched slots, so repeated scans cost
// O(distinct columns), not O(table size).

const INITIAL_TABLE_SIZE: usize = 997;

pub(crate) struct ColumnHash {
    table: Vec<i32>, // slot -> store index, -1 when empty
    store: Vec<u64>, // column contents, one block per index
    used: Vec<u32>,  // slots touched since the last reset
    block_words: usize,
}

impl ColumnHash {
    pub(crate) fn new() -> Self {
        ColumnHash {
            table: vec![-1; INITIAL_TABLE_SIZE],
            store: Vec::with_capacity(1000),
            used: Vec::with_capacity(100),
            block_words: 1,
        }
    }

    /// Prepare for a scan that inserts at most `max_entries` distinct blocks
    /// of `block_words` limbs each. Keeps the table at least twice the worst
    /// case so probing stays short; growth only happens while the table is
    /// empty, which the reset discipline guarantees on entry.
    pub(crate) fn begin(&mut self, max_entries: usize, block_words: usize) {
        debug_assert!(self.used.is_empty());
        debug_assert!(self.store.is_empty());
        if self.table.len() < 2 * max_entries {
            self.table = vec![-1; next_prime(2 * max_entries)];
        }
        self.block_words = block_words;
    }

    /// Index of a 32-bit column, inserting on first occurrence.
    pub(crate) fn lookup_u32(&mut self, entry: u32) -> usize {
        debug_assert_eq!(self.block_words, 1);
        let size = self.table.len();
        let mut key = jenkins_key(&entry.to_le_bytes(), size);
        loop {
            let slot = self.table[key];
            if slot < 0 {
                break;
            }
            if self.store[slot as usize] == entry as u64 {
                return slot as usize;
            }
            key = (key + 1) % size;
        }
        let index = self.store.len();
        self.table[key] = index as i32;
        self.store.push(entry as u64);
        self.used.push(key as u32);
        index
    }

    /// Index of a multi-limb column, inserting on first occurrence.
    pub(crate) fn lookup_words(&mut self, block: &[u64]) -> usize {
        debug_assert_eq!(block.len(), self.block_words);
        let nwords = self.block_words;
        let size = self.table.len();
        let mut key = jenkins_key_words(block, size);
        loop {
            let slot = self.table[key];
            if slot < 0 {
                break;
            }
            let start = slot as usize * nwords;
            if &self.store[start..start + nwords] == block {
                return slot as usize;
            }
            key = (key + 1) % size;
        }
        let index = self.store.len() / nwords;
        self.table[key] = index as i32;
        self.store.extend_from_slice(block);
        self.used.push(key as u32);
        index
    }

    /// Number of distinct columns seen since the last reset.
    pub(crate) fn distinct(&self) -> usize {
        self.used.len()
    }

    /// Return every touched slot to the -1 sentinel and drop the store.
    pub(crate) fn reset(&mut self) {
        for &slot in &self.used {
            self.table[slot as usize] = -1;
        }
        self.used.clear();
        self.store.clear();
    }
}

// https://en.wikipedia.org/wiki/Jenkins_hash_function
fn jenkins_finish(mut hash: u32, size: usize) -> usize {
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);
    hash as usize % size
}

fn jenkins_key(bytes: &[u8], size: usize) -> usize {
    let mut hash: u32 = 0;
    for &b in bytes {
        hash = hash.wrapping_add(b as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    jenkins_finish(hash, size)
}

fn jenkins_key_words(words: &[u64], size: usize) -> usize {
    let mut hash: u32 = 0;
    for w in words {
        for b in w.to_le_bytes() {
            hash = hash.wrapping_add(b as u32);
            hash = hash.wrapping_add(hash << 10);
            hash ^= hash >> 6;
        }
    }
    jenkins_finish(hash, size)
}

fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    loop {
        if is_prime(candidate) {
            return candidate;
        }
        candidate += 1;
    }
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}
