use lazy_static::lazy_static;
use std::sync::Arc;
use testcontainers::{clients::Cli, Container};
use testcontainers_modules::postgres::Postgres;
use tokio_postgres::{Client, NoTls};

pub struct TestDatabase {
    pub connection_string: String,
    _container: Container<'static, Postgres>
}

impl TestDatabase {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        lazy_static! {
            static ref DOCKER: Arc<Cli> = Arc::new(Cli::default());
        }

        let container = DOCKER.run(Postgres::default());
        let port = container.get_host_port_ipv4(5432);

        let connection_string = format!(
            "host=localhost port={} user=postgres password=postgres dbname=postgres",
            port
        );

        let client = connect(&connection_string).await?;
        client.batch_execute(include_str!("schema.sql")).await?;

        Ok(TestDatabase {
            connection_string,
            _container: container
        })
    }

    pub async fn get_client(&self) -> Result<Client, Box<dyn std::error::Error>> {
        connect(&self.connection_string).await
    }

    /// Seeds four players and five tournaments:
    ///
    /// | id | date       | ruleset  | matches                                          |
    /// |----|------------|----------|--------------------------------------------------|
    /// | 1  | 2023-01-01 | seeded   | Alice beats Bob, Bob draws Carol                 |
    /// | 2  | 2023-01-01 | unseeded | Carol beats Alice, Dave beats a deleted player   |
    /// | 3  | 2023-03-01 | team     | Dave beats Alice                                 |
    /// | 4  | 2023-02-01 | Multiple | Bob beats Alice (seeded), Carol beats Dave (none) |
    /// | 5  | 2023-04-01 | mixed    | none                                             |
    pub async fn seed_test_data(&self) -> Result<(), Box<dyn std::error::Error>> {
        let client = self.get_client().await?;

        client
            .batch_execute(
                "INSERT INTO players (id, name) VALUES
                    (1, 'Alice'), (2, 'Bob'), (3, 'Carol'), (4, 'Dave');

                INSERT INTO tournaments (id, name, date, ruleset) VALUES
                    (1, 'Seeded Cup', '2023-01-01', 'seeded'),
                    (2, 'Open Race', '2023-01-01', 'unseeded'),
                    (3, 'Relay', '2023-03-01', 'team'),
                    (4, 'Grab Bag', '2023-02-01', 'Multiple'),
                    (5, 'Empty Open', '2023-04-01', 'mixed');

                INSERT INTO matches (id, tournament_id, winner_id, loser_id, score, ruleset) VALUES
                    (1, 1, 1, 2, '2-1', NULL),
                    (2, 1, 2, 3, 'draw', NULL),
                    (3, 2, 3, 1, '1-0', NULL),
                    (4, 2, 4, NULL, '1-0', NULL),
                    (5, 3, 4, 1, '1-0', NULL),
                    (6, 4, 2, 1, '3-2', 'seeded'),
                    (7, 4, 3, 4, '3-2', '');"
            )
            .await?;

        Ok(())
    }
}

async fn connect(connection_string: &str) -> Result<Client, Box<dyn std::error::Error>> {
    let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("Database connection error: {}", e);
        }
    });

    Ok(client)
}
