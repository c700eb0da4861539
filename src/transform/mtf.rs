//! Move-to-Front transform (§4.6).
//!
//! Grounded on `kanzi/transform/MTFT.go`: 256 payload nodes split into 16
//! sublists (sizes 1, 17×15) so a lookup only walks its own sublist
//! instead of the full 256-entry chain, with periodic rebalancing to keep
//! sublist 0 from growing unbounded. Restructured per the design note in
//! spec.md §9 into an index-addressed arena of 257 nodes (node `i` is
//! always the slot for symbol `i`, node 256 is the ring anchor) rather
//! than a pointer graph, so every unlink has a well-defined neighbor.

const NUM_SUBLISTS: usize = 16;
const LIST_LENGTH: u32 = 17;
const RESET_THRESHOLD: u32 = 64;
const ANCHOR: usize = 256;

#[derive(Debug, Clone, Copy, Default)]
struct Node {
    prev: usize,
    next: usize,
}

/// Forward/inverse Move-to-Front transform over a full byte alphabet.
pub struct Mtf {
    nodes: [Node; 257],
    heads: [usize; NUM_SUBLISTS],
    lengths: [u32; NUM_SUBLISTS],
    buckets: [usize; 256],
}

impl Mtf {
    pub fn new() -> Self {
        let mut mtf = Mtf {
            nodes: [Node::default(); 257],
            heads: [0; NUM_SUBLISTS],
            lengths: [0; NUM_SUBLISTS],
            buckets: [0; 256],
        };
        for i in 0..256 {
            mtf.nodes[i].prev = if i == 0 { ANCHOR } else { i - 1 };
            mtf.nodes[i].next = if i == 255 { ANCHOR } else { i + 1 };
        }
        mtf.nodes[ANCHOR].next = 0;
        mtf.nodes[ANCHOR].prev = 255;
        mtf.rebalance();
        mtf
    }

    /// Walk the ring in its current order, redrawing sublist boundaries
    /// at sizes `[1, 17, 17, ..., 17]` without touching the ring itself.
    fn rebalance(&mut self) {
        log::debug!("mtf rebalance: sublist 0 length was {}", self.lengths[0]);
        let mut cursor = self.nodes[ANCHOR].next;
        for list_idx in 0..NUM_SUBLISTS {
            let size = if list_idx == 0 { 1 } else { LIST_LENGTH };
            self.heads[list_idx] = cursor;
            self.lengths[list_idx] = size;
            for _ in 0..size {
                self.buckets[cursor] = list_idx;
                cursor = self.nodes[cursor].next;
            }
        }
    }

    fn unlink(&mut self, node: usize) {
        let p = self.nodes[node].prev;
        let n = self.nodes[node].next;
        self.nodes[p].next = n;
        self.nodes[n].prev = p;
    }

    /// Push `node` to the head of sublist 0 (and the front of the ring).
    fn push_front(&mut self, node: usize) {
        let insert_before = if self.lengths[0] == 0 {
            self.nodes[ANCHOR].next
        } else {
            self.heads[0]
        };
        let p = self.nodes[insert_before].prev;
        self.nodes[node].prev = p;
        self.nodes[node].next = insert_before;
        self.nodes[p].next = node;
        self.nodes[insert_before].prev = node;
        self.heads[0] = node;
        self.lengths[0] += 1;
        self.buckets[node] = 0;
    }

    /// Transform `data` into a stream of ranks.
    pub fn forward(&mut self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len());
        let mut prev: Option<u8> = None;

        for &c in data {
            if prev == Some(c) {
                out.push(0);
                continue;
            }

            let node = c as usize;
            let list_idx = self.buckets[node];

            let mut offset = 0u32;
            let mut cursor = self.heads[list_idx];
            while cursor != node {
                cursor = self.nodes[cursor].next;
                offset += 1;
            }
            let rank: u32 = self.lengths[..list_idx].iter().sum::<u32>() + offset;
            out.push(rank as u8);

            let was_head = self.heads[list_idx] == node;
            let successor = self.nodes[node].next;
            self.unlink(node);
            self.lengths[list_idx] -= 1;
            if was_head {
                self.heads[list_idx] = successor;
            }

            self.push_front(node);

            if self.lengths[0] > RESET_THRESHOLD || self.lengths[list_idx] == 0 {
                self.rebalance();
            }

            prev = Some(c);
        }

        out
    }

    /// Invert a transform produced by [`Mtf::forward`], starting from a
    /// fresh identity table — no relation to `forward`'s arena, matching
    /// the plain array-based decoder spec.md §4.6 describes.
    pub fn inverse(data: &[u8]) -> Vec<u8> {
        let mut table: [u8; 256] = [0; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }

        let mut out = Vec::with_capacity(data.len());
        for &r in data {
            let r = r as usize;
            let sym = table[r];
            out.push(sym);

            if r < 16 {
                for i in (1..=r).rev() {
                    table[i] = table[i - 1];
                }
            } else {
                table.copy_within(0..r, 1);
            }
            table[0] = sym;
        }
        out
    }
}

impl Default for Mtf {
    fn default() -> Self {
        Self::new()
    }
}
