//! Application-wide constants to avoid magic values throughout the codebase.
//!
//! This module centralizes endpoint URLs, probe sizes, grading thresholds and
//! the French phase/use-case catalogs used across the application.

/// Output format constants
pub mod output_formats {
    /// Text output format - colorful report with grades and recommendations
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - score plus underperforming metrics only
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Remote endpoints probed during an assessment
pub mod endpoints {
    /// Cloudflare trace endpoint used for latency and packet-loss probes
    pub const TRACE: &str = "https://1.1.1.1/cdn-cgi/trace";
    /// Cloudflare bulk download endpoint (takes a `bytes` query parameter)
    pub const BULK_DOWNLOAD: &str = "https://speed.cloudflare.com/__down";
    /// Cloudflare bulk upload endpoint
    pub const BULK_UPLOAD: &str = "https://speed.cloudflare.com/__up";
    /// Public IP and ASN lookup endpoint
    pub const IP_INFO: &str = "https://ipinfo.io/json";
    /// Base URL for ASN upstream provider lookups
    pub const ASN_UPSTREAMS_BASE: &str = "https://api.bgpview.io";
    /// Primary host resolved during the DNS phase
    pub const DNS_PRIMARY_HOST: &str = "speed.cloudflare.com";
    /// Fallback host resolved when the primary fails
    pub const DNS_FALLBACK_HOST: &str = "one.one.one.one";
    /// Port paired with DNS lookup hosts
    pub const DNS_PORT: u16 = 443;
}

/// Probe sizes, sample counts and timeouts
pub mod probe {
    use std::time::Duration;

    /// Number of round-trip samples taken during the latency phase
    pub const LATENCY_SAMPLES: usize = 20;
    /// Latency charged for a failed round-trip sample, in milliseconds
    pub const LATENCY_FAILURE_PENALTY_MS: f64 = 3000.0;
    /// Number of probes sent during the packet-loss phase
    pub const LOSS_PROBES: usize = 30;
    /// Per-probe deadline for the packet-loss phase
    pub const LOSS_PROBE_TIMEOUT: Duration = Duration::from_secs(3);
    /// Payload size for the download phase (25 MiB)
    pub const DOWNLOAD_BYTES: u64 = 25 * 1024 * 1024;
    /// Overall deadline for the download phase
    pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(90);
    /// Payload size for the upload phase (10 MiB)
    pub const UPLOAD_BYTES: usize = 10 * 1024 * 1024;
    /// Number of chunks the upload payload is split into
    pub const UPLOAD_CHUNKS: usize = 5;
    /// Bytes of random data at the head of each upload chunk
    pub const UPLOAD_RANDOM_PREFIX: usize = 65536;
    /// Number of download runs during the consistency phase
    pub const CONSISTENCY_RUNS: usize = 3;
    /// Payload size per consistency run (5 MiB)
    pub const CONSISTENCY_BYTES: u64 = 5 * 1024 * 1024;
    /// Resolutions faster than this are reported as cached, in milliseconds
    pub const DNS_CACHED_THRESHOLD_MS: f64 = 1.0;
    /// Deadline for the public IP / ASN lookup
    pub const ISP_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);
    /// Deadline for the ASN upstream provider lookup
    pub const UPSTREAM_LOOKUP_TIMEOUT: Duration = Duration::from_secs(4);
    /// TCP connect timeout shared by all probe requests
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Grading thresholds per metric
pub mod grade {
    /// Download speed floors in Mbps for excellent/good/fair
    pub const DOWNLOAD_EXCELLENT_MBPS: f64 = 100.0;
    pub const DOWNLOAD_GOOD_MBPS: f64 = 50.0;
    pub const DOWNLOAD_FAIR_MBPS: f64 = 20.0;
    /// Upload speed floors in Mbps for excellent/good/fair
    pub const UPLOAD_EXCELLENT_MBPS: f64 = 50.0;
    pub const UPLOAD_GOOD_MBPS: f64 = 20.0;
    pub const UPLOAD_FAIR_MBPS: f64 = 10.0;
    /// Latency ceilings in milliseconds for excellent/good/fair
    pub const LATENCY_EXCELLENT_MS: f64 = 10.0;
    pub const LATENCY_GOOD_MS: f64 = 30.0;
    pub const LATENCY_FAIR_MS: f64 = 60.0;
    /// Jitter ceilings in milliseconds for excellent/good/fair
    pub const JITTER_EXCELLENT_MS: f64 = 5.0;
    pub const JITTER_GOOD_MS: f64 = 15.0;
    pub const JITTER_FAIR_MS: f64 = 30.0;
    /// Packet-loss ceilings in percent for good/fair (zero loss is excellent)
    pub const LOSS_GOOD_PCT: f64 = 1.0;
    pub const LOSS_FAIR_PCT: f64 = 3.0;
    /// DNS resolution ceilings in milliseconds for excellent/good/fair
    pub const DNS_EXCELLENT_MS: f64 = 20.0;
    pub const DNS_GOOD_MS: f64 = 50.0;
    pub const DNS_FAIR_MS: f64 = 100.0;
    /// Consistency floors in percent for excellent/good/fair
    pub const CONSISTENCY_EXCELLENT_PCT: f64 = 95.0;
    pub const CONSISTENCY_GOOD_PCT: f64 = 85.0;
    pub const CONSISTENCY_FAIR_PCT: f64 = 70.0;
}

/// Weights and points feeding the overall score
pub mod score {
    /// Weight of the download grade
    pub const WEIGHT_DOWNLOAD: u32 = 3;
    /// Weight of the upload grade
    pub const WEIGHT_UPLOAD: u32 = 2;
    /// Weight of the latency grade
    pub const WEIGHT_LATENCY: u32 = 2;
    /// Weight of the packet-loss grade
    pub const WEIGHT_PACKET_LOSS: u32 = 2;
    /// Weight of the consistency grade
    pub const WEIGHT_CONSISTENCY: u32 = 2;
    /// Weight of the jitter grade
    pub const WEIGHT_JITTER: u32 = 1;
    /// Weight of the DNS grade
    pub const WEIGHT_DNS: u32 = 1;
    /// Sum of all weights
    pub const TOTAL_WEIGHT: u32 = WEIGHT_DOWNLOAD
        + WEIGHT_UPLOAD
        + WEIGHT_LATENCY
        + WEIGHT_PACKET_LOSS
        + WEIGHT_CONSISTENCY
        + WEIGHT_JITTER
        + WEIGHT_DNS;

    /// Points awarded for an excellent grade
    pub const POINTS_EXCELLENT: u32 = 100;
    /// Points awarded for a good grade
    pub const POINTS_GOOD: u32 = 75;
    /// Points awarded for a fair grade
    pub const POINTS_FAIR: u32 = 40;
    /// Points awarded for a poor grade
    pub const POINTS_POOR: u32 = 10;
}

/// Values recorded when a phase fails and its metric cannot be measured
pub mod fallback {
    /// Latency charged when the latency phase fails, in milliseconds
    pub const LATENCY_MS: f64 = 999.0;
    /// Jitter recorded when the jitter phase fails, in milliseconds
    pub const JITTER_MS: f64 = 0.0;
    /// Packet loss recorded when the loss phase fails, in percent
    pub const PACKET_LOSS_PCT: f64 = 100.0;
    /// Download speed recorded when the download phase fails, in Mbps
    pub const DOWNLOAD_MBPS: f64 = 0.0;
    /// Consistency recorded when the consistency phase fails, in percent
    pub const CONSISTENCY_PCT: f64 = 0.0;
    /// Resolution time recorded when the DNS phase fails, in milliseconds
    pub const DNS_MS: f64 = 0.0;
    /// Per-user bandwidth recorded when that phase fails, in Mbps
    pub const PER_USER_MBPS: f64 = 0.0;
}

/// Assessment phase catalog
pub mod phases {
    use crate::core::types::{PhaseDescriptor, PhaseId};

    /// All phases in execution order
    pub const ALL: [PhaseDescriptor; 8] = [
        PhaseDescriptor {
            id: PhaseId::Latency,
            name: "Latence",
            description: "Mesure du temps aller-retour vers Cloudflare (20 échantillons)",
        },
        PhaseDescriptor {
            id: PhaseId::Jitter,
            name: "Gigue",
            description: "Calcul de la variation de latence (écart-type)",
        },
        PhaseDescriptor {
            id: PhaseId::PacketLoss,
            name: "Pertes de paquets",
            description: "Envoi de 30 sondes avec délai de 3 s",
        },
        PhaseDescriptor {
            id: PhaseId::Download,
            name: "Téléchargement",
            description: "Téléchargement de 25 Mo depuis Cloudflare",
        },
        PhaseDescriptor {
            id: PhaseId::Upload,
            name: "Envoi",
            description: "Envoi de 10 Mo vers Cloudflare",
        },
        PhaseDescriptor {
            id: PhaseId::Dns,
            name: "Résolution DNS",
            description: "Mesure du temps de résolution de domaine",
        },
        PhaseDescriptor {
            id: PhaseId::Consistency,
            name: "Consistance",
            description: "Trois × 5 Mo téléchargés, coefficient de variation",
        },
        PhaseDescriptor {
            id: PhaseId::PerUser,
            name: "Bande passante / utilisateur",
            description: "Calcul de la bande passante par utilisateur simultané",
        },
    ];
}

/// Bandwidth requirements checked against the per-user result
pub mod use_cases {
    use crate::core::types::UseCase;

    /// All use cases, ordered by ascending bandwidth requirement
    pub const ALL: [UseCase; 4] = [
        UseCase {
            label: "VoIP / Appels vocaux",
            required_mbps_per_user: 0.1,
            requirement_label: "0,1 Mbps/util.",
        },
        UseCase {
            label: "Visioconférence",
            required_mbps_per_user: 2.0,
            requirement_label: "2,0 Mbps/util.",
        },
        UseCase {
            label: "Travail standard",
            required_mbps_per_user: 5.0,
            requirement_label: "5,0 Mbps/util.",
        },
        UseCase {
            label: "Marge confortable",
            required_mbps_per_user: 10.0,
            requirement_label: "10 Mbps/util.",
        },
    ];
}

/// Default configuration values
pub mod defaults {
    /// Default office label
    pub const OFFICE_LABEL: &str = "Bureau";
    /// Default number of simultaneous users
    pub const USER_COUNT: u32 = 10;
    /// Minimum accepted user count
    pub const MIN_USERS: u32 = 1;
    /// Maximum accepted user count
    pub const MAX_USERS: u32 = 500;
    /// Name of the configuration file searched for at startup
    pub const CONFIG_FILE_NAME: &str = ".netgrade.toml";
    /// How many parent directories are searched for a configuration file
    pub const CONFIG_PARENT_SEARCH_DEPTH: usize = 3;
}

/// Pauses surrounding the assessment loop
pub mod timing {
    use std::time::Duration;

    /// Grace period granted to an in-flight phase after cancellation
    pub const CANCEL_GRACE: Duration = Duration::from_millis(500);
    /// Pause between the last phase and the report
    pub const RESULT_PAUSE: Duration = Duration::from_millis(400);
}
