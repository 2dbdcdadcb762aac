use clap::{Parser, Subcommand};

use crate::ratings::Outcome;

/// `DishSwipe` - swipe-to-rate dishes with live like/dislike counts.
#[derive(Parser, Debug)]
#[command(name = "dishswipe")]
#[command(version)]
#[command(about = "Swipe right on the dishes you loved.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP/WebSocket gateway
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// List every dish, newest first
    Dishes {
        /// Only the dishes of this order
        #[arg(short, long)]
        order: Option<String>,
    },

    /// Insert the sample dishes
    Seed {
        /// Also associate the seeded dishes with this order number
        #[arg(short, long)]
        order: Option<String>,
    },

    /// Rate a dish
    Rate {
        dish_id: String,

        /// like or dislike
        #[arg(value_parser = parse_outcome)]
        rating: Outcome,

        /// Optional free-text comment
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Show like/dislike counts for a dish
    Counts { dish_id: String },

    /// Show configuration and store status
    Status,
}

fn parse_outcome(value: &str) -> Result<Outcome, String> {
    value
        .parse()
        .map_err(|_| format!("expected `like` or `dislike`, got `{value}`"))
}
