//! `paas invites` command - Organization invitations
//!
//! Every environment is owned by an organization, and users join
//! organizations to reach its environments. These subcommands send new
//! invitations by email and manage the pending ones.

use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{print_json, truncate_str, wants_json, Invocation};
use crate::cli::table::Table;
use crate::cli::GlobalOpts;
use crate::core::invites::{self, InviteRole};

#[derive(Subcommand, Debug)]
pub enum InvitesCommands {
    /// Accept an organization invite
    #[command(long_about = "Alternative to the link in the invitation email. \
        The email contains the invite code to pass here.")]
    Accept(AcceptArgs),

    /// List all pending organization invitations
    #[command(long_about = "Lists pending invites for the associated environment's \
        organization. Accepted invites are not shown.")]
    List,

    /// Remove a pending organization invitation
    #[command(long_about = "Removes a pending invitation found with `paas invites list`. \
        An invite that has been accepted cannot be removed.")]
    Rm(RmArgs),

    /// Send an invite to a user by email
    #[command(long_about = "Invites a user to the associated environment's organization. \
        The user joins as a basic member unless -a is given. The recipient needs an \
        account only to accept, not to receive the invitation.")]
    Send(SendArgs),
}

#[derive(clap::Args, Debug)]
pub struct AcceptArgs {
    /// The invite code that was sent in the invite email
    #[arg(value_name = "INVITE_CODE")]
    pub invite_code: String,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// The ID of an invitation to remove
    #[arg(value_name = "INVITE_ID")]
    pub invite_id: String,
}

#[derive(clap::Args, Debug)]
pub struct SendArgs {
    /// Email of the user to invite
    #[arg(value_name = "EMAIL")]
    pub email: String,

    /// Invite as a basic member (default)
    #[arg(long, short = 'm', conflicts_with = "admin")]
    pub member: bool,

    /// Invite as an admin
    #[arg(long, short = 'a')]
    pub admin: bool,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl SendArgs {
    pub fn role(&self) -> InviteRole {
        if self.admin {
            InviteRole::Admin
        } else {
            InviteRole::Member
        }
    }
}

pub fn run(cmd: InvitesCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        InvitesCommands::Accept(args) => run_accept(args, global),
        InvitesCommands::List => run_list(global),
        InvitesCommands::Rm(args) => run_rm(args, global),
        InvitesCommands::Send(args) => run_send(args, global),
    }
}

fn run_accept(args: AcceptArgs, global: &GlobalOpts) -> Result<()> {
    let inv = Invocation::signed_in(global)?;
    let org_id = invites::accept(&inv.transport, &inv.ctx, &args.invite_code)?;
    println!(
        "{} Successfully joined organization {}",
        style("✓").green(),
        style(&org_id).cyan()
    );
    if !global.quiet {
        println!("Run \"paas associate\" to start working with its environments.");
    }
    Ok(())
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let inv = Invocation::signed_in(global)?;
    let env = inv.ctx.require_association()?;

    let pending = invites::list(&inv.transport, &inv.ctx)?;
    if wants_json(global) {
        return print_json(&pending);
    }
    if pending.is_empty() {
        println!("There are no pending invites for {}", env.name);
        return Ok(());
    }

    let roles = invites::list_roles(&inv.transport, &inv.ctx)?;
    let mut table = Table::new(&["ID", "EMAIL", "ROLE"]);
    for invite in &pending {
        table.push_row([
            invite.id.clone(),
            truncate_str(&invite.email, 40),
            invites::role_name(&roles, invite.role),
        ]);
    }

    if !global.quiet {
        println!("Pending invites for {}:\n", style(&env.name).bold());
    }
    println!("{}", table.render(global.format));
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let inv = Invocation::signed_in(global)?;
    inv.ctx.require_association()?;

    invites::rm(&inv.transport, &inv.ctx, &args.invite_id)?;
    println!("{} Invite {} removed", style("✓").green(), style(&args.invite_id).cyan());
    Ok(())
}

fn run_send(args: SendArgs, global: &GlobalOpts) -> Result<()> {
    let inv = Invocation::signed_in(global)?;
    let env = inv.ctx.require_association()?;
    let role = args.role();

    let roles = invites::list_roles(&inv.transport, &inv.ctx)?;
    let role_id = invites::role_id(&roles, role)?;

    if !args.yes {
        let prompt = format!(
            "Invite {} to the {} organization as {}?",
            args.email, env.name, role
        );
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    invites::send(&inv.transport, &inv.ctx, &args.email, role_id)?;
    println!(
        "{} Invite sent to {} as {}",
        style("✓").green(),
        style(&args.email).cyan(),
        role
    );
    Ok(())
}
