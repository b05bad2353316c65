//! User lookup and creation

use anyhow::Result;
use clap::{ArgGroup, Parser};
use lightbnb_db::{Database, NewUser};

use super::{print_json, require};

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("key").required(true).args(["email", "id"])))]
pub struct UserArgs {
    /// Email to look up (LIKE pattern: % and _ are wildcards)
    #[arg(long)]
    pub email: Option<String>,

    /// User id to look up
    #[arg(long)]
    pub id: Option<i32>,
}

pub async fn run_user(args: UserArgs, db: &Database) -> Result<()> {
    let user = match (args.email, args.id) {
        (Some(email), _) => db.get_user_with_email(&email).await,
        (None, Some(id)) => db.get_user_with_id(id).await,
        (None, None) => None,
    };
    print_json(&require(user, "user")?)
}

#[derive(Parser, Debug)]
pub struct AddUserArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Stored as given; hash it before passing it here
    #[arg(long)]
    pub password: String,
}

pub async fn run_add_user(args: AddUserArgs, db: &Database) -> Result<()> {
    let user = NewUser::new(args.name, args.email, args.password);
    let rows = db.add_user(&user).await;
    print_json(&require(rows, "user")?)
}
