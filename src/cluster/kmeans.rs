use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct KMeansParams {
    pub k: usize,
    pub n_init: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct KMeans {
    pub centroids: Vec<Vec<f64>>,
    pub assignments: Vec<usize>,
    pub inertia: f64,
}

impl KMeans {
    /// Runs `n_init` seeded k-means++ restarts and keeps the lowest-inertia
    /// partition. Every run stops after `max_iterations`.
    pub fn fit(data: &[Vec<f64>], params: &KMeansParams) -> Self {
        if data.is_empty() || params.k == 0 {
            return Self {
                centroids: Vec::new(),
                assignments: Vec::new(),
                inertia: 0.0,
            };
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut best: Option<KMeans> = None;

        for _ in 0..params.n_init.max(1) {
            let run = single_run(data, params, &mut rng);
            let better = best.as_ref().map_or(true, |current| run.inertia < current.inertia);
            if better {
                best = Some(run);
            }
        }

        best.unwrap_or_else(|| Self {
            centroids: Vec::new(),
            assignments: vec![0; data.len()],
            inertia: 0.0,
        })
    }
}

fn single_run(data: &[Vec<f64>], params: &KMeansParams, rng: &mut StdRng) -> KMeans {
    let k = params.k.min(data.len());
    let dim = data[0].len();
    let mut centroids = init_plus_plus(data, k, rng);
    let mut assignments = vec![0usize; data.len()];

    for _ in 0..params.max_iterations {
        for (idx, point) in data.iter().enumerate() {
            assignments[idx] = nearest(point, &centroids).0;
        }

        let mut sums = vec![vec![0.0; dim]; k];
        let mut counts = vec![0usize; k];
        for (point, &cluster) in data.iter().zip(&assignments) {
            for (sum, value) in sums[cluster].iter_mut().zip(point) {
                *sum += value;
            }
            counts[cluster] += 1;
        }

        let mut shift = 0.0;
        for cluster in 0..k {
            // empty clusters keep their previous centroid
            if counts[cluster] == 0 {
                continue;
            }
            let updated: Vec<f64> = sums[cluster]
                .iter()
                .map(|sum| sum / counts[cluster] as f64)
                .collect();
            shift += distance_sq(&updated, &centroids[cluster]);
            centroids[cluster] = updated;
        }

        if shift <= params.tolerance {
            break;
        }
    }

    let mut inertia = 0.0;
    for (idx, point) in data.iter().enumerate() {
        let (cluster, dist) = nearest(point, &centroids);
        assignments[idx] = cluster;
        inertia += dist;
    }

    KMeans {
        centroids,
        assignments,
        inertia,
    }
}

fn init_plus_plus(data: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(data[rng.gen_range(0..data.len())].clone());

    while centroids.len() < k {
        let weights: Vec<f64> = data.iter().map(|point| nearest(point, &centroids).1).collect();
        let total: f64 = weights.iter().sum();

        let next = if total <= 0.0 {
            rng.gen_range(0..data.len())
        } else {
            let mut target = rng.gen::<f64>() * total;
            let mut chosen = data.len() - 1;
            for (idx, weight) in weights.iter().enumerate() {
                if target < *weight {
                    chosen = idx;
                    break;
                }
                target -= weight;
            }
            chosen
        };
        centroids.push(data[next].clone());
    }

    centroids
}

fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best = (0usize, f64::MAX);
    for (idx, centroid) in centroids.iter().enumerate() {
        let dist = distance_sq(point, centroid);
        if dist < best.1 {
            best = (idx, dist);
        }
    }
    best
}

fn distance_sq(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}
