use num_traits::NumRef;
use rand::{distributions::{uniform::SampleUniform, Alphanumeric, Distribution, Uniform}, Rng};

use crate::Keyed;

const NAME_LEN: usize = 8;

/// A city record as stored in a heap: the population is the ordering key
/// and the name is opaque payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct City<T: Ord + Clone + NumRef> {
    pub name: String,
    pub population: T
}

impl<T: Ord + Clone + NumRef> City<T> {
    pub fn new(name: impl Into<String>, population: T) -> Self {
        Self{name: name.into(), population}
    }
}

impl<T: Ord + Clone + NumRef> Keyed for City<T> {
    type Key = T;
    fn key(&self) -> &T {
        &self.population
    }
}

/// Sample a city with a uniformly random population and a random
/// alphanumeric name, mainly useful for generating test data
impl<T: Ord + Clone + NumRef + SampleUniform> Distribution<City<T>> for Uniform<T> {
    fn sample<R>(&self, rng: &mut R) -> City<T> where R: Rng + ?Sized {
        let name = (0..NAME_LEN).map(|_|rng.sample(Alphanumeric) as char).collect();
        let population = <Uniform<T> as Distribution<T>>::sample(self, rng);
        City{name, population}
    }
}

/// Sum the populations of a collection of cities
pub fn total_population<'a, T>(cities: impl IntoIterator<Item = &'a City<T>>) -> T
where T: Ord + Clone + NumRef + 'a {
    let mut a = T::zero();
    for c in cities {
        a = a + &c.population;
    }
    a
}

#[cfg(test)]
mod tests {
    use rand::distributions::{Distribution, Uniform};

    use crate::bheap::{BoundedHeap, BuildStrategy, HeapOrder, SiftStrategy};

    use super::*;

    const NUM_CITIES: usize = 300;
    const POP_LIMIT: u64 = 1_000_000;
    #[cfg(not(feature = "stress_tests"))]
    const TRIALS: usize = 10;
    #[cfg(feature = "stress_tests")]
    const TRIALS: usize = 200;

    #[test]
    fn sampled_cities() {
        let mut rng = rand::thread_rng();
        let dist = Uniform::new_inclusive(0u64, POP_LIMIT);
        let c: City<u64> = dist.sample(&mut rng);
        assert_eq!(c.name.len(), NAME_LEN);
        assert!(c.name.chars().all(|ch|ch.is_ascii_alphanumeric()));
        assert!(c.population <= POP_LIMIT);
    }

    #[test]
    fn population_sum() {
        let cities = vec![City::new("a", 3u64), City::new("b", 4), City::new("c", 10)];
        assert_eq!(total_population(&cities), 17);
    }

    #[test]
    fn random_build_equivalence() {
        let mut rng = rand::thread_rng();
        let pop_dist = Uniform::new_inclusive(0, POP_LIMIT);
        for t in 0..TRIALS {
            eprintln!("Generating {} random cities (trial {})", NUM_CITIES, t);
            let base: Vec<City<u64>> = (0..NUM_CITIES).map(|_|pop_dist.sample(&mut rng)).collect();
            for order in [HeapOrder::Max, HeapOrder::Min] {
                let mut reference: Option<Vec<u64>> = None;
                for build in [BuildStrategy::Iterative, BuildStrategy::Recursive, BuildStrategy::Floyd] {
                    for sift in [SiftStrategy::Iterative, SiftStrategy::Recursive] {
                        let heap = BoundedHeap::make(base.clone(), order, build, sift);
                        if !heap.check_heap() {
                            panic!("Heap built wrong with {:?}/{:?}/{:?}!", order, build, sift)
                        }
                        let pops: Vec<u64> = heap.into_sorted().into_iter().map(|c|c.population).collect();
                        assert!(pops.windows(2).all(|w|match order {
                            HeapOrder::Max => w[0] >= w[1],
                            HeapOrder::Min => w[0] <= w[1]
                        }));
                        match &reference {
                            None => reference = Some(pops),
                            Some(r) => if &pops != r {
                                panic!("Extraction order disagreed with {:?}/{:?}/{:?}!", order, build, sift)
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn random_churn() {
        let mut rng = rand::thread_rng();
        let pop_dist = Uniform::new_inclusive(0, POP_LIMIT);
        for _ in 0..TRIALS {
            let base: Vec<City<u64>> = (0..NUM_CITIES).map(|_|pop_dist.sample(&mut rng)).collect();
            let mut heap = BoundedHeap::make(base, HeapOrder::Max, BuildStrategy::Floyd, SiftStrategy::Recursive);
            for _ in 0..NUM_CITIES/2 {
                heap.pop().unwrap();
                assert!(heap.check_heap());
            }
            for _ in 0..NUM_CITIES/2 {
                let c: City<u64> = pop_dist.sample(&mut rng);
                heap.push(c).unwrap();
                assert!(heap.check_heap());
            }
            assert!(heap.is_full());
        }
    }
}
