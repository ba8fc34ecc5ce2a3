// Simulated deployment progress: a fixed sequence of (progress, status)
// steps advanced on a fixed delay. This is a UI affordance, not an
// orchestration protocol — there is no failure branch and no cancellation,
// and it has no relationship to what the backend actually does with a
// submitted plan.

use std::time::Duration;

use tokio::time::sleep;
use uuid::Uuid;

use crate::infra::InfraStore;

/// The full sequence, first step to last. The final step always lands on 100.
pub const DEPLOYMENT_STEPS: &[(u8, &str)] = &[
    (10, "Initializing deployment..."),
    (25, "Provisioning VPN servers..."),
    (40, "Configuring network interfaces..."),
    (55, "Deploying Redis cluster..."),
    (70, "Deploying Kafka brokers..."),
    (85, "Running health checks..."),
    (95, "Finalizing configuration..."),
    (100, "Deployment complete!"),
];

pub const STEP_DELAY: Duration = Duration::from_millis(800);

/// Drive the store through the whole sequence, printing each step. Returns
/// the deployment id the run was tagged with.
pub async fn run_simulation(store: &mut InfraStore) -> Uuid {
    run_simulation_with_delay(store, STEP_DELAY).await
}

pub async fn run_simulation_with_delay(store: &mut InfraStore, delay: Duration) -> Uuid {
    let id = store.start_deployment();
    for (progress, status) in DEPLOYMENT_STEPS {
        sleep(delay).await;
        store.update_deployment_progress(*progress, status);
        println!("  [{:>3}%] {}", progress, status);
    }
    store.complete_deployment(true);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_monotonic_and_end_at_100() {
        let mut last = 0;
        for (progress, status) in DEPLOYMENT_STEPS {
            assert!(*progress > last);
            assert!(!status.is_empty());
            last = *progress;
        }
        assert_eq!(DEPLOYMENT_STEPS.len(), 8);
        assert_eq!(DEPLOYMENT_STEPS[0].0, 10);
        assert_eq!(last, 100);
    }

    #[tokio::test]
    async fn simulation_walks_the_store_to_completion() {
        let mut store = InfraStore::new();
        let id = run_simulation_with_delay(&mut store, Duration::ZERO).await;
        let state = store.state();
        assert!(!state.is_deploying);
        assert_eq!(state.deployment_progress, 100);
        assert_eq!(state.deployment_id, Some(id));
        assert_eq!(state.deployment_status, "Deployment completed successfully!");
    }
}
