//! Shared test harness: every test starts from a cleared store seeded with
//! `SEED_COUNT` random posts.
//!
//! Set `TEST_DATABASE_URL` to run the suite against Postgres instead of the
//! in-memory store.

use std::sync::LazyLock;

use api_server::AppState;
use blog_core::domain::{Author, NewPost, Post};
use blog_core::ports::PostRepository;
use rand::Rng;
use rand::seq::SliceRandom;
use tokio::sync::{Mutex, MutexGuard};

pub const SEED_COUNT: usize = 10;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Barbara", "Edsger", "Frances", "Donald", "Radia", "Ken", "Margaret",
];
const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Liskov", "Dijkstra", "Allen", "Knuth", "Perlman", "Thompson",
    "Hamilton",
];
const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "borrow", "checker", "lifetime", "trait", "crate",
    "async", "runtime", "channel", "future", "pinned", "slice", "vector", "iterator", "closure",
];

/// Build an in-process actix app around `$state`, with the request-id middleware mounted.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(api_server::observability::RequestIdMiddleware)
                .app_data(actix_web::web::Data::new($state.clone()))
                .configure(api_server::configure_app),
        )
        .await
    };
}

pub fn random_words(rng: &mut impl Rng, min: usize, max: usize) -> String {
    let count = rng.gen_range(min..=max);
    (0..count)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One random post, shaped like a client create request.
pub fn generate_blog_data() -> NewPost {
    let mut rng = rand::thread_rng();
    NewPost {
        title: random_words(&mut rng, 2, 5),
        content: random_words(&mut rng, 8, 20),
        author: Author::new(
            *FIRST_NAMES.choose(&mut rng).unwrap(),
            *LAST_NAMES.choose(&mut rng).unwrap(),
        ),
    }
}

pub async fn seed_blog_data(repo: &dyn PostRepository, count: usize) -> Vec<Post> {
    let data = (0..count).map(|_| generate_blog_data()).collect();
    repo.insert_many(data).await.expect("seed posts")
}

pub async fn tear_down_db(repo: &dyn PostRepository) {
    repo.clear().await.expect("clear posts");
}

/// Every test that runs against `TEST_DATABASE_URL` shares one database; hold
/// this for the whole test so resets never interleave.
static DATABASE_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Postgres-backed state when `TEST_DATABASE_URL` is set, with the schema migrated.
#[cfg(feature = "postgres")]
async fn database_state() -> Option<(AppState, MutexGuard<'static, ()>)> {
    use std::sync::Arc;

    use blog_infra::{DatabaseConfig, DatabaseConnections, PostgresPostRepository};
    use migration::{Migrator, MigratorTrait};

    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let guard = DATABASE_LOCK.lock().await;

    let mut config = DatabaseConfig::new(url);
    config.max_connections = 5;
    config.min_connections = 1;

    let connections = DatabaseConnections::init(&config)
        .await
        .expect("connect TEST_DATABASE_URL");
    Migrator::up(&connections.main, None)
        .await
        .expect("migrate test database");

    let repo = Arc::new(PostgresPostRepository::new(connections.main));
    Some((AppState::with_repository(repo, "postgres"), guard))
}

#[cfg(not(feature = "postgres"))]
async fn database_state() -> Option<(AppState, MutexGuard<'static, ()>)> {
    None
}

/// Per-test state: an app state and direct access to its store.
pub struct TestContext {
    pub state: AppState,
    pub seeded: Vec<Post>,
    _database_guard: Option<MutexGuard<'static, ()>>,
}

impl TestContext {
    /// Store reset and seeded with `SEED_COUNT` posts. Uses the database named
    /// by `TEST_DATABASE_URL`, or a fresh in-memory store when it is unset.
    pub async fn seeded() -> Self {
        let (state, guard) = match database_state().await {
            Some((state, guard)) => (state, Some(guard)),
            None => (AppState::in_memory(), None),
        };

        let mut ctx = Self {
            state,
            seeded: Vec::new(),
            _database_guard: guard,
        };
        ctx.reset().await;
        ctx
    }

    /// Drop every post and reseed, whatever the store currently holds.
    pub async fn reset(&mut self) {
        tear_down_db(self.repo()).await;
        self.seeded = seed_blog_data(self.repo(), SEED_COUNT).await;
    }

    pub fn repo(&self) -> &dyn PostRepository {
        self.state.posts.as_ref()
    }
}
