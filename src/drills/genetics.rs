use crate::utils::error::{DrillError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gene(u8);

impl Gene {
    pub fn new(value: u8) -> Result<Self> {
        if value > 1 {
            return Err(DrillError::InvalidInput {
                field: "gene".to_string(),
                value: value.to_string(),
                reason: "Gene: value must be 0 or 1".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self(rng.u8(0..=1))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn flip(&mut self) {
        self.0 = 1 - self.0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    genes: Vec<Gene>,
}

impl Chromosome {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    pub fn random(len: usize, rng: &mut fastrand::Rng) -> Self {
        Self::new((0..len).map(|_| Gene::random(rng)).collect())
    }

    pub fn genes(&self) -> Vec<u8> {
        self.genes.iter().map(Gene::value).collect()
    }

    /// 一半機率整條翻轉
    pub fn flip(&mut self, rng: &mut fastrand::Rng) {
        if rng.bool() {
            self.genes.iter_mut().for_each(Gene::flip);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dna {
    chromosomes: Vec<Chromosome>,
}

impl Dna {
    pub fn new(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }

    pub fn random(chromosomes: usize, genes: usize, rng: &mut fastrand::Rng) -> Self {
        Self::new(
            (0..chromosomes)
                .map(|_| Chromosome::random(genes, rng))
                .collect(),
        )
    }

    pub fn chromosomes(&self) -> Vec<Vec<u8>> {
        self.chromosomes.iter().map(Chromosome::genes).collect()
    }

    pub fn flip(&mut self, rng: &mut fastrand::Rng) {
        if rng.bool() {
            for chromosome in &mut self.chromosomes {
                chromosome.flip(rng);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Organism {
    pub dna: Dna,
    pub environment: f64,
}

impl Organism {
    pub fn new(dna: Dna, environment: f64) -> Self {
        Self { dna, environment }
    }

    pub fn mutate(&mut self, rng: &mut fastrand::Rng) {
        if rng.f64() < self.environment {
            self.dna.flip(rng);
        }
    }

    pub fn all_ones(&self) -> bool {
        self.dna
            .chromosomes
            .iter()
            .flat_map(|c| c.genes.iter())
            .all(|g| g.value() == 1)
    }
}

/// 反覆突變直到全部基因為 1，回傳經過的世代數；超過上限回傳 `None`
pub fn evolve(
    organism: &mut Organism,
    rng: &mut fastrand::Rng,
    max_generations: u64,
) -> Option<u64> {
    for generation in 1..=max_generations {
        organism.mutate(rng);
        if organism.all_ones() {
            tracing::debug!("🧬 All genes reached 1 after {} generations", generation);
            return Some(generation);
        }
    }
    tracing::debug!("🧬 Gave up after {} generations", max_generations);
    None
}
