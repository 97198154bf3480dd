// Boots one simulation server per test binary and hands out its base URL.
use std::{
    net::{SocketAddr, TcpStream},
    sync::{Arc, OnceLock},
    time::{Duration, Instant},
};

// Base URL of the shared server, set once it accepts connections.
static BASE_URL: OnceLock<String> = OnceLock::new();

// How long the server gets to bind and start accepting.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(2);

// Returns the base URL, starting the server on first use.
//
// Every test in the binary talks to the same world, so tests must not rely
// on absolute simtimes or on the pause switch staying put.
pub fn ensure_server() -> &'static str {
    BASE_URL.get_or_init(|| {
        let bound = Arc::new(OnceLock::<SocketAddr>::new());
        spawn_server_thread(Arc::clone(&bound));
        let addr = wait_for_bind(&bound);
        wait_until_accepting(addr);
        format!("http://{addr}")
    })
}

// The server owns a runtime on its own OS thread so it outlives the
// short-lived runtime of each `#[tokio::test]`.
fn spawn_server_thread(bound: Arc<OnceLock<SocketAddr>>) {
    std::thread::Builder::new()
        .name("sim-test-server".into())
        .spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Port 0 lets the OS pick a free port.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let _ = bound.set(listener.local_addr().expect("get local addr"));
                rover_sim_server::run(listener).await.expect("server failed");
            });
        })
        .expect("spawn server thread");
}

fn wait_for_bind(bound: &OnceLock<SocketAddr>) -> SocketAddr {
    let deadline = Instant::now() + STARTUP_TIMEOUT;
    while Instant::now() < deadline {
        if let Some(addr) = bound.get() {
            return *addr;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("simulation server never bound a port");
}

fn wait_until_accepting(addr: SocketAddr) {
    let deadline = Instant::now() + STARTUP_TIMEOUT;
    while Instant::now() < deadline {
        if TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    panic!("simulation server at {addr} did not accept connections in time");
}
