use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use customer_desk::api_client::CustomerApiClient;
use customer_desk::config::{validate_base_url, Config};
use customer_desk::customer_detail::CustomerDetailPage;
use customer_desk::customer_form::{CustomerForm, FormField};
use customer_desk::customer_list::{CustomerListPage, FilterType};
use customer_desk::customer_new::NewCustomerPage;
use customer_desk::models::Customer;
use customer_desk::notices::Notices;
use customer_desk::routes::Route;
use customer_desk::upload::{self, SelectedFile};

#[derive(Parser, Debug)]
#[command(name = "customer-desk", about = "Manage customers, leads and their photos")]
struct Cli {
    /// REST base, e.g. http://localhost:5000/api.
    #[arg(long, env = "CUSTOMER_API_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List customers and leads.
    List {
        #[arg(long, default_value = "all")]
        filter: FilterType,
        /// Substring of name, email or phone.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one customer with its images.
    Show { id: i64 },
    /// Create a customer or lead.
    Create(FieldArgs),
    /// Edit a customer; unspecified fields keep their value.
    Update {
        id: i64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a customer and all its images.
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Upload image files for a customer.
    Upload {
        id: i64,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Delete one image.
    DeleteImage {
        id: i64,
        image_id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Save one image to disk.
    DownloadImage {
        id: i64,
        image_id: i64,
        /// Overrides DOWNLOAD_DIR.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    referral_source: Option<String>,
    #[arg(long)]
    price: Option<String>,
    /// Days between contacts.
    #[arg(long)]
    contact_frequency: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    start_date: Option<String>,
    /// HH:MM
    #[arg(long)]
    start_time: Option<String>,
    /// Minutes.
    #[arg(long)]
    estimated_duration: Option<String>,
    /// true for a lead, false for a converted customer.
    #[arg(long)]
    lead: Option<String>,
}

impl FieldArgs {
    fn apply(&self, form: &mut CustomerForm) {
        let pairs = [
            (FormField::Name, &self.name),
            (FormField::Email, &self.email),
            (FormField::PhoneNumber, &self.phone),
            (FormField::Address, &self.address),
            (FormField::ReferralSource, &self.referral_source),
            (FormField::Price, &self.price),
            (FormField::ContactFrequency, &self.contact_frequency),
            (FormField::StartDate, &self.start_date),
            (FormField::StartTime, &self.start_time),
            (FormField::EstimatedDuration, &self.estimated_duration),
            (FormField::IsLead, &self.lead),
        ];
        for (field, value) in pairs {
            if let Some(raw) = value {
                form.set_field(field, raw);
            }
        }
    }
}

fn print_notices(notices: &mut Notices) {
    for notice in notices.drain() {
        println!("{}", notice);
    }
}

fn print_navigation(route: Option<Route>) {
    if let Some(route) = route {
        println!("→ {}", route);
    }
}

fn print_customer(customer: &Customer) {
    println!("#{} {} [{}]", customer.id, customer.name, customer.kind_label());
    println!("  Email:    {}", customer.email);
    println!("  Phone:    {}", customer.phone_number);
    println!("  Address:  {}", customer.address);
    if let Some(source) = customer.referral_source.as_deref().filter(|s| !s.is_empty()) {
        println!("  Source:   {}", source);
    }
    if let Some(price) = customer.price.filter(|p| *p != 0.0) {
        println!("  Price:    ${:.2}", price);
    }
    if let Some(freq) = customer.contact_frequency.filter(|f| *f != 0) {
        println!("  Contact:  every {} days", freq);
    }
    if let Some(date) = customer.start_date.as_deref().filter(|s| !s.is_empty()) {
        let time = customer.start_time.as_deref().unwrap_or_default();
        println!("  Start:    {} {}", date.split('T').next().unwrap_or(date), time);
    }
    if let Some(minutes) = customer.estimated_duration.filter(|m| *m != 0) {
        println!("  Duration: {} minutes", minutes);
    }
    println!("  Created:  {}", customer.created_at.format("%b %-d, %Y"));
}

/// Main entry point.
///
/// Loads configuration, builds the API client and runs one page interaction.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "customer_desk=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config.api_base_url = validate_base_url(base_url)?;
    }

    let client = CustomerApiClient::new(config.api_base_url.clone())?;

    match cli.command {
        Command::List { filter, search } => {
            let mut page = CustomerListPage::new();
            page.load(&client).await;
            page.set_filter(filter);
            page.set_search_term(search);
            print_notices(&mut page.notices);

            let visible = page.visible();
            let stats = page.stats();
            println!(
                "{} {} ({} contacts: {} leads, {} customers)",
                visible.len(),
                page.count_label(),
                stats.total,
                stats.leads,
                stats.customers
            );
            for customer in visible {
                println!(
                    "{:>6}  {:<8}  {:<28}  {:<32}  {}",
                    customer.id,
                    customer.kind_label(),
                    customer.name,
                    customer.email,
                    customer.phone_number
                );
            }
        }

        Command::Show { id } => {
            let mut page = CustomerDetailPage::new(id);
            page.load(&client).await;
            print_notices(&mut page.notices);
            let Some(customer) = page.customer() else {
                print_navigation(page.navigation);
                anyhow::bail!("customer {} could not be loaded", id);
            };
            print_customer(customer);

            println!(
                "Images ({}/{}, {})",
                page.image_count(),
                upload::MAX_IMAGES,
                upload::slots_label(page.image_count())
            );
            for (index, image) in page.gallery.images().iter().enumerate() {
                println!(
                    "  {:>6}  {:<32}  {}",
                    image.id,
                    page.gallery.display_name(index),
                    image.uploaded_at.format("%b %-d, %Y %H:%M")
                );
            }
        }

        Command::Create(fields) => {
            let mut page = NewCustomerPage::new();
            fields.apply(&mut page.form);
            let result = page.submit(&client).await;
            print_notices(&mut page.notices);
            let customer = result?;
            print_customer(&customer);
            print_navigation(page.navigation);
        }

        Command::Update { id, fields } => {
            let mut page = CustomerDetailPage::new(id);
            page.load(&client).await;
            print_notices(&mut page.notices);
            if page.customer().is_none() {
                anyhow::bail!("customer {} could not be loaded", id);
            }
            if let Some(form) = page.start_edit() {
                fields.apply(form);
            }
            let result = page.save_edit(&client).await;
            print_notices(&mut page.notices);
            result?;
            if let Some(customer) = page.customer() {
                print_customer(customer);
            }
        }

        Command::Delete { id, yes } => {
            let mut page = CustomerDetailPage::new(id);
            page.load(&client).await;
            print_notices(&mut page.notices);
            if page.customer().is_none() {
                anyhow::bail!("customer {} could not be loaded", id);
            }
            page.request_delete();
            println!("{}: {}", page.delete.title, page.delete.message);
            if !yes {
                page.delete.cancel();
                println!("Not deleted. Re-run with --yes to confirm.");
                return Ok(());
            }
            let result = page.confirm_delete(&client).await;
            print_notices(&mut page.notices);
            result?;
            print_navigation(page.navigation);
        }

        Command::Upload { id, files } => {
            let mut page = CustomerDetailPage::new(id);
            page.load(&client).await;
            print_notices(&mut page.notices);
            if page.customer().is_none() {
                anyhow::bail!("customer {} could not be loaded", id);
            }

            let mut selected = Vec::with_capacity(files.len());
            for path in &files {
                selected.push(SelectedFile::from_path(path).await?);
            }

            let result = page.upload_images(&client, selected).await;
            print_notices(&mut page.notices);
            result?;
            println!(
                "{} image(s) on file, {}",
                page.image_count(),
                upload::slots_label(page.image_count())
            );
        }

        Command::DeleteImage { id, image_id, yes } => {
            let mut page = CustomerDetailPage::new(id);
            page.load(&client).await;
            print_notices(&mut page.notices);
            page.request_image_delete(image_id)?;
            println!("{}: {}", page.gallery.delete.title, page.gallery.delete.message);
            if !yes {
                page.gallery.delete.cancel();
                println!("Not deleted. Re-run with --yes to confirm.");
                return Ok(());
            }
            let result = page.confirm_image_delete(&client).await;
            print_notices(&mut page.notices);
            result?;
            println!("{} image(s) remaining", page.image_count());
        }

        Command::DownloadImage { id, image_id, out } => {
            let mut page = CustomerDetailPage::new(id);
            page.load(&client).await;
            print_notices(&mut page.notices);
            let dir = out.unwrap_or_else(|| config.download_dir.clone());
            let result = page.download_image(image_id, &dir).await;
            print_notices(&mut page.notices);
            println!("Saved {}", result?.display());
        }
    }

    Ok(())
}
