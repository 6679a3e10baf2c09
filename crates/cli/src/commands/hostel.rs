//! Hostel administration

use crate::context::Context;
use crate::output::{emit, heading, notice, or_dash, reply, success};
use academics::{available_rooms, awaiting_payment, format_amount, pending, residents, status_label};
use anyhow::bail;
use clap::{Args, Subcommand};
use shared::{EntityId, HostelRegistration, NewRoom, Room};

#[derive(Debug, Args)]
pub struct HostelCommand {
    #[command(subcommand)]
    pub command: HostelSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum HostelSubcommand {
    /// List rooms
    Rooms {
        /// Only rooms with free beds
        #[arg(long)]
        available: bool,
    },
    /// Add a room
    AddRoom {
        #[arg(long)]
        number: String,
        #[arg(long, default_value = "DOUBLE_SHARING")]
        room_type: String,
        #[arg(long, default_value_t = 2)]
        capacity: u32,
        #[arg(long)]
        fee: f64,
    },
    /// Registration queues
    Registrations {
        /// Show current residents instead
        #[arg(long)]
        residents: bool,
    },
    /// Allot a room to a pending registration
    Approve {
        registration: String,
        #[arg(long)]
        room: String,
    },
    /// Move a resident to another room
    ChangeRoom {
        registration: String,
        #[arg(long)]
        room: String,
    },
}

impl HostelCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        match &self.command {
            HostelSubcommand::Rooms { available } => {
                ctx.enter("/manage-rooms").await?;
                let rooms = ctx.call("Loading rooms", |c| async move { c.rooms().await }).await?;
                let shown: Vec<&Room> = if *available { available_rooms(&rooms) } else { rooms.iter().collect() };
                emit(ctx.json, &shown, |rooms| {
                    heading("Rooms");
                    for room in rooms {
                        println!(
                            "  {:<6} {:<8} {:<16} {:>2} free  {}",
                            room.id,
                            room.room_number,
                            room.room_type,
                            room.capacity,
                            format_amount(room.fee)
                        );
                    }
                })
            }
            HostelSubcommand::AddRoom { number, room_type, capacity, fee } => {
                ctx.enter("/manage-rooms").await?;
                if number.trim().is_empty() {
                    bail!("Room number is required");
                }
                let room = NewRoom {
                    room_number: number.trim().to_string(),
                    room_type: room_type.clone(),
                    capacity: *capacity,
                    fee: *fee,
                };
                let created = ctx.call("Creating room", |c| async move { c.create_room(&room).await }).await?;
                success(&format!("Room {} created (id {})", created.room_number, created.id));
                Ok(())
            }
            HostelSubcommand::Registrations { residents: show_residents } => {
                let path = if *show_residents { "/hostel-residents" } else { "/manage-hostel" };
                ctx.enter(path).await?;
                let registrations = ctx
                    .call("Loading registrations", |c| async move { c.hostel_registrations().await })
                    .await?;

                if *show_residents {
                    let list = residents(&registrations);
                    return emit(ctx.json, &list, |list| print_queue("Residents", list));
                }
                let queues = serde_json::json!({
                    "pending": pending(&registrations),
                    "awaitingPayment": awaiting_payment(&registrations),
                });
                emit(ctx.json, &queues, |_| {
                    print_queue("Pending", &pending(&registrations));
                    print_queue("Awaiting payment", &awaiting_payment(&registrations));
                })
            }
            HostelSubcommand::Approve { registration, room } => {
                ctx.enter("/manage-hostel").await?;
                let room = EntityId::parse(room);
                ensure_room_available(ctx, &room).await?;
                let registration = EntityId::parse(registration);
                let message = ctx
                    .call("Allotting room", |c| async move { c.approve_registration(&registration, &room).await })
                    .await?;
                reply(&message, "Room allotted");
                Ok(())
            }
            HostelSubcommand::ChangeRoom { registration, room } => {
                ctx.enter("/hostel-residents").await?;
                let room = EntityId::parse(room);
                ensure_room_available(ctx, &room).await?;
                let registration = EntityId::parse(registration);
                let message = ctx
                    .call("Changing room", |c| async move { c.change_room(&registration, &room).await })
                    .await?;
                reply(&message, "Room changed");
                Ok(())
            }
        }
    }
}

async fn ensure_room_available(ctx: &mut Context, room: &EntityId) -> anyhow::Result<()> {
    let rooms = ctx.call("Checking rooms", |c| async move { c.rooms().await }).await?;
    if !available_rooms(&rooms).iter().any(|r| &r.id == room) {
        bail!("Room {} has no free beds", room);
    }
    Ok(())
}

fn print_queue(title: &str, registrations: &[&HostelRegistration]) {
    heading(title);
    if registrations.is_empty() {
        notice("  none");
    }
    for r in registrations {
        println!(
            "  {:<6} {:<24} {:<28} {:<8} {}",
            r.registration_id,
            r.student_name,
            r.student_email,
            or_dash(r.room_number.as_deref()),
            status_label(r.status)
        );
    }
}
