use crate::error::HomCountError;
use crate::hom_count::Evaluation;
use num::BigUint;

impl<'a> Evaluation<'a> {
    /// The root vector, with the two subtrees below every join computed by
    /// `rayon::join`.
    pub(crate) fn parallel(&self) -> Result<Vec<BigUint>, HomCountError> {
        self.subtree(self.ntd.root())
    }

    fn subtree(&self, top: usize) -> Result<Vec<BigUint>, HomCountError> {
        // introduce/forget chains are walked without recursion
        let mut chain = vec![];
        let mut bottom = top;
        while let [child] = self.ntd.children(bottom) {
            chain.push(bottom);
            bottom = *child;
        }

        let mut vector = match self.ntd.children(bottom) {
            [left, right] => {
                let (left, right) =
                    rayon::join(|| self.subtree(*left), || self.subtree(*right));
                let (left, right) = (left?, right?);
                self.evaluate_node(bottom, &[left.as_slice(), right.as_slice()])?
            }
            _ => self.evaluate_node(bottom, &[])?,
        };
        for idx in chain.into_iter().rev() {
            vector = self.evaluate_node(idx, &[vector.as_slice()])?;
        }
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::generators::{complete, complete_bipartite, cycle, petersen, random_gnp};
    use crate::hom_count::{HomomorphismCounter, Traversal};

    #[test]
    fn agrees_with_sequential() {
        let sources = vec![cycle(6), petersen(), random_gnp(12, 0.3, 5)];
        let targets = vec![complete(3), complete_bipartite(2, 2), cycle(5)];
        for source in sources.iter() {
            for target in targets.iter() {
                let sequential = HomomorphismCounter::default().count(source, target).unwrap();
                let parallel = HomomorphismCounter::default()
                    .traversal(Traversal::Parallel)
                    .count(source, target)
                    .unwrap();
                assert_eq!(sequential, parallel);
            }
        }
    }
}
