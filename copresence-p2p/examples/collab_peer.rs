use copresence_core::{SessionIdentity, TrackingEvent};
use copresence_p2p::{CollabSession, ExperienceId, SessionConfig, SessionUpdate};
use std::time::Duration;

/// Joins the experience given as the first argument, or hosts a new one.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = SessionConfig::default();
    let poll_interval = Duration::from_millis(config.poll_interval_ms);

    let mut session = match std::env::args().nth(1) {
        Some(id) => CollabSession::join(config, ExperienceId::parse(&id)?).await?,
        None => CollabSession::host(config).await?,
    };

    println!("Joined experience {}", session.experience_id());
    println!("Share this ID with nearby devices");

    // Stand-in for the tracking subsystem: announce one frame identity so
    // peers can attribute our anchors.
    session.handle_tracking_event(TrackingEvent::FrameIdentityChanged {
        identity: SessionIdentity::random(),
    });

    let mut interval = tokio::time::interval(poll_interval);
    loop {
        interval.tick().await;

        for update in session.poll() {
            match update {
                SessionUpdate::AlignmentReceived { from, blob } => {
                    println!("Alignment data from {} ({} bytes)", from, blob.len());
                }
                SessionUpdate::Scene(command) => {
                    println!("Scene command: {command:?}");
                }
            }
        }
    }
}
