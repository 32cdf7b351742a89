//! Serialised concurrent access to a ledger
//!
//! The ledger's read-modify-write sequences (balance check then debit, lookup
//! then status change) must never interleave. Instead of locking, a single
//! tokio task owns the `Ledger` and handles commands from a bounded queue one
//! at a time. Callers hold a cloneable [`LedgerHandle`] and await replies over
//! oneshot channels.
//!
//! ```text
//! LedgerHandle ──┐
//! LedgerHandle ──┼──▶ mpsc queue ──▶ ledger task (owns Ledger + ScriptRunner)
//! LedgerHandle ──┘                         │
//!        ▲                                 │
//!        └────────── oneshot reply ◀───────┘
//! ```

use crate::core::ledger::Ledger;
use crate::core::script::ScriptRunner;
use crate::types::{
    Account, AccountId, Favorite, FavoriteId, LedgerError, LedgerSnapshot, Money, Operation,
    Payment, PaymentId,
};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

type Reply<T> = oneshot::Sender<Result<T, LedgerError>>;

/// Requests understood by the ledger task
enum Command {
    Register {
        phone: String,
        reply: Reply<Account>,
    },
    Deposit {
        account: AccountId,
        amount: Money,
        reply: Reply<()>,
    },
    Pay {
        account: AccountId,
        amount: Money,
        category: String,
        reply: Reply<Payment>,
    },
    FindAccount {
        account: AccountId,
        reply: Reply<Account>,
    },
    FindPayment {
        payment: PaymentId,
        reply: Reply<Payment>,
    },
    FindFavorite {
        favorite: FavoriteId,
        reply: Reply<Favorite>,
    },
    Reject {
        payment: PaymentId,
        reply: Reply<()>,
    },
    Confirm {
        payment: PaymentId,
        reply: Reply<()>,
    },
    Repeat {
        payment: PaymentId,
        reply: Reply<Payment>,
    },
    Favorite {
        payment: PaymentId,
        name: String,
        reply: Reply<Favorite>,
    },
    PayFavorite {
        favorite: FavoriteId,
        reply: Reply<Payment>,
    },
    Apply {
        operation: Operation,
        reply: Reply<()>,
    },
    Snapshot {
        reply: Reply<LedgerSnapshot>,
    },
    Restore {
        snapshot: LedgerSnapshot,
        reply: Reply<()>,
    },
}

/// Cloneable handle to a ledger owned by a background task
///
/// Each method enqueues one command and waits for its reply. Commands from
/// all handles are processed strictly one after another. Owned copies of the
/// records are returned since the ledger lives in another task.
#[derive(Debug, Clone)]
pub struct LedgerHandle {
    sender: mpsc::Sender<Command>,
}

impl LedgerHandle {
    /// Move `ledger` into a new task on the current tokio runtime
    ///
    /// `capacity` bounds the number of queued commands; senders wait when the
    /// queue is full. A capacity of 0 is treated as 1. The task stops once
    /// every handle has been dropped.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(ledger: Ledger, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        tokio::spawn(run(ledger, receiver));
        Self { sender }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(command(reply))
            .await
            .map_err(|_| LedgerError::LedgerUnavailable)?;
        response.await.map_err(|_| LedgerError::LedgerUnavailable)?
    }

    pub async fn register_account(&self, phone: impl Into<String>) -> Result<Account, LedgerError> {
        let phone = phone.into();
        self.request(|reply| Command::Register { phone, reply }).await
    }

    pub async fn deposit(&self, account: AccountId, amount: Money) -> Result<(), LedgerError> {
        self.request(|reply| Command::Deposit {
            account,
            amount,
            reply,
        })
        .await
    }

    pub async fn pay(
        &self,
        account: AccountId,
        amount: Money,
        category: impl Into<String>,
    ) -> Result<Payment, LedgerError> {
        let category = category.into();
        self.request(|reply| Command::Pay {
            account,
            amount,
            category,
            reply,
        })
        .await
    }

    pub async fn find_account_by_id(&self, account: AccountId) -> Result<Account, LedgerError> {
        self.request(|reply| Command::FindAccount { account, reply })
            .await
    }

    pub async fn find_payment_by_id(&self, payment: PaymentId) -> Result<Payment, LedgerError> {
        self.request(|reply| Command::FindPayment { payment, reply })
            .await
    }

    pub async fn find_favorite_by_id(&self, favorite: FavoriteId) -> Result<Favorite, LedgerError> {
        self.request(|reply| Command::FindFavorite { favorite, reply })
            .await
    }

    pub async fn reject(&self, payment: PaymentId) -> Result<(), LedgerError> {
        self.request(|reply| Command::Reject { payment, reply })
            .await
    }

    pub async fn confirm(&self, payment: PaymentId) -> Result<(), LedgerError> {
        self.request(|reply| Command::Confirm { payment, reply })
            .await
    }

    pub async fn repeat(&self, payment: PaymentId) -> Result<Payment, LedgerError> {
        self.request(|reply| Command::Repeat { payment, reply })
            .await
    }

    pub async fn favorite_payment(
        &self,
        payment: PaymentId,
        name: impl Into<String>,
    ) -> Result<Favorite, LedgerError> {
        let name = name.into();
        self.request(|reply| Command::Favorite {
            payment,
            name,
            reply,
        })
        .await
    }

    pub async fn pay_from_favorite(&self, favorite: FavoriteId) -> Result<Payment, LedgerError> {
        self.request(|reply| Command::PayFavorite { favorite, reply })
            .await
    }

    /// Apply a script operation; labels are shared by every handle
    pub async fn apply(&self, operation: Operation) -> Result<(), LedgerError> {
        self.request(|reply| Command::Apply { operation, reply })
            .await
    }

    pub async fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    pub async fn restore(&self, snapshot: LedgerSnapshot) -> Result<(), LedgerError> {
        self.request(|reply| Command::Restore { snapshot, reply })
            .await
    }
}

async fn run(mut ledger: Ledger, mut receiver: mpsc::Receiver<Command>) {
    let mut script = ScriptRunner::new();

    while let Some(command) = receiver.recv().await {
        handle(&mut ledger, &mut script, command);
    }

    debug!("ledger task stopped");
}

// A dropped reply receiver means the caller went away; the command has
// already been applied either way, so send failures are ignored.
fn handle(ledger: &mut Ledger, script: &mut ScriptRunner, command: Command) {
    match command {
        Command::Register { phone, reply } => {
            let _ = reply.send(ledger.register_account(&phone).cloned());
        }
        Command::Deposit {
            account,
            amount,
            reply,
        } => {
            let _ = reply.send(ledger.deposit(account, amount));
        }
        Command::Pay {
            account,
            amount,
            category,
            reply,
        } => {
            let _ = reply.send(ledger.pay(account, amount, &category).cloned());
        }
        Command::FindAccount { account, reply } => {
            let _ = reply.send(ledger.find_account_by_id(account).cloned());
        }
        Command::FindPayment { payment, reply } => {
            let _ = reply.send(ledger.find_payment_by_id(&payment).cloned());
        }
        Command::FindFavorite { favorite, reply } => {
            let _ = reply.send(ledger.find_favorite_by_id(&favorite).cloned());
        }
        Command::Reject { payment, reply } => {
            let _ = reply.send(ledger.reject(&payment));
        }
        Command::Confirm { payment, reply } => {
            let _ = reply.send(ledger.confirm(&payment));
        }
        Command::Repeat { payment, reply } => {
            let _ = reply.send(ledger.repeat(&payment).cloned());
        }
        Command::Favorite {
            payment,
            name,
            reply,
        } => {
            let _ = reply.send(ledger.favorite_payment(&payment, &name).cloned());
        }
        Command::PayFavorite { favorite, reply } => {
            let _ = reply.send(ledger.pay_from_favorite(&favorite).cloned());
        }
        Command::Apply { operation, reply } => {
            let _ = reply.send(script.apply(ledger, operation));
        }
        Command::Snapshot { reply } => {
            let _ = reply.send(Ok(ledger.snapshot()));
        }
        Command::Restore { snapshot, reply } => {
            let _ = reply.send(ledger.restore(snapshot));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id_gen::SequentialIdGenerator;
    use crate::types::PaymentStatus;

    fn spawn() -> LedgerHandle {
        LedgerHandle::spawn(
            Ledger::with_id_generator(Box::new(SequentialIdGenerator::new())),
            16,
        )
    }

    #[tokio::test]
    async fn test_handle_round_trips_operations() {
        let handle = spawn();

        let account = handle.register_account("+992000000001").await.unwrap();
        handle.deposit(account.id, 1_000).await.unwrap();
        let payment = handle.pay(account.id, 400, "auto").await.unwrap();
        handle.reject(payment.id.clone()).await.unwrap();

        let stored = handle.find_payment_by_id(payment.id.clone()).await.unwrap();
        assert_eq!(stored.status, PaymentStatus::Fail);
        assert_eq!(
            handle.find_account_by_id(account.id).await.unwrap().balance,
            1_000
        );

        let favorite = handle.favorite_payment(payment.id.clone(), "fuel").await.unwrap();
        let again = handle.pay_from_favorite(favorite.id.clone()).await.unwrap();
        assert_eq!(again.amount, 400);
        let repeated = handle.repeat(again.id.clone()).await.unwrap();
        handle.confirm(repeated.id.clone()).await.unwrap();

        assert_eq!(
            handle.find_favorite_by_id(favorite.id).await.unwrap().name,
            "fuel"
        );
        assert_eq!(
            handle.find_account_by_id(account.id).await.unwrap().balance,
            200
        );
    }

    #[tokio::test]
    async fn test_handle_returns_ledger_errors() {
        let handle = spawn();
        let result = handle.deposit(999, 10).await;
        assert_eq!(result.unwrap_err(), LedgerError::account_not_found(999));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_payments_never_overdraw() {
        let handle = spawn();
        let account = handle.register_account("+992000000001").await.unwrap().id;
        handle.deposit(account, 1_000).await.unwrap();

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let handle = handle.clone();
                tokio::spawn(async move { handle.pay(account, 30, "auto").await })
            })
            .collect();

        let mut succeeded = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(error) => assert!(matches!(error, LedgerError::InsufficientBalance { .. })),
            }
        }

        // 1000 / 30 = 33 payments fit
        assert_eq!(succeeded, 33);
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.payments.len(), 33);
        assert_eq!(snapshot.accounts[0].balance, 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_rejects_credit_once() {
        let handle = spawn();
        let account = handle.register_account("+992000000001").await.unwrap().id;
        handle.deposit(account, 500).await.unwrap();
        let payment = handle.pay(account, 500, "auto").await.unwrap().id;

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let handle = handle.clone();
                let payment = payment.clone();
                tokio::spawn(async move { handle.reject(payment).await })
            })
            .collect();

        let mut succeeded = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 1);
        assert_eq!(
            handle.find_account_by_id(account).await.unwrap().balance,
            500
        );
    }

    #[tokio::test]
    async fn test_apply_and_restore() {
        let handle = spawn();
        handle
            .apply(Operation::Register {
                phone: "+992000000001".to_string(),
            })
            .await
            .unwrap();
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.accounts.len(), 1);

        handle.restore(LedgerSnapshot::default()).await.unwrap();
        assert!(handle.snapshot().await.unwrap().accounts.is_empty());
    }

    #[test]
    fn test_handle_reports_unavailable_after_runtime_shutdown() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let handle = runtime.block_on(async { spawn() });
        drop(runtime);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let result = runtime.block_on(handle.deposit(1, 10));
        assert_eq!(result.unwrap_err(), LedgerError::LedgerUnavailable);
    }
}
