use serde::Serialize;
use std::fmt;

/// Color tag handed to the renderer. Maps onto the `stat-card--{tag}` CSS classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatColor {
    Primary,
    Success,
    Info,
    Warning,
    Danger,
    Gray,
}

impl StatColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatColor::Primary => "primary",
            StatColor::Success => "success",
            StatColor::Info => "info",
            StatColor::Warning => "warning",
            StatColor::Danger => "danger",
            StatColor::Gray => "gray",
        }
    }
}

impl fmt::Display for StatColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Danger when anything needs attention, success when the count is zero.
pub fn attention_color(value: i64) -> StatColor {
    if value > 0 { StatColor::Danger } else { StatColor::Success }
}

/// One card of the stats overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub value: i64,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: StatColor,
}

/// Raw counter values behind the cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsOverview {
    pub total_projects: i64,
    pub total_tickets: i64,
    pub my_assigned_tickets: i64,
    pub new_tickets_this_week: i64,
    pub unassigned_tickets: i64,
    pub my_created_tickets: i64,
    pub overdue_tickets: i64,
    pub team_members: i64,
}

impl StatsOverview {
    /// The eight cards in display order.
    pub fn cards(&self) -> Vec<StatCard> {
        vec![
            StatCard {
                label: "Total Projects",
                value: self.total_projects,
                description: "Active projects in the system",
                icon: "heroicon-m-rectangle-stack",
                color: StatColor::Primary,
            },
            StatCard {
                label: "Total Tickets",
                value: self.total_tickets,
                description: "Tickets across all projects",
                icon: "heroicon-m-ticket",
                color: StatColor::Success,
            },
            StatCard {
                label: "My Assigned Tickets",
                value: self.my_assigned_tickets,
                description: "Tickets assigned to you",
                icon: "heroicon-m-user-circle",
                color: StatColor::Info,
            },
            StatCard {
                label: "New Tickets This Week",
                value: self.new_tickets_this_week,
                description: "Created in the last 7 days",
                icon: "heroicon-m-plus-circle",
                color: StatColor::Info,
            },
            StatCard {
                label: "Unassigned Tickets",
                value: self.unassigned_tickets,
                description: "Tickets without any assignee",
                icon: "heroicon-m-user-minus",
                color: attention_color(self.unassigned_tickets),
            },
            StatCard {
                label: "My Created Tickets",
                value: self.my_created_tickets,
                description: "Tickets you created",
                icon: "heroicon-m-pencil-square",
                color: StatColor::Warning,
            },
            StatCard {
                label: "Overdue Tickets",
                value: self.overdue_tickets,
                description: "Past due date",
                icon: "heroicon-m-exclamation-triangle",
                color: attention_color(self.overdue_tickets),
            },
            StatCard {
                label: "Team Members",
                value: self.team_members,
                description: "Registered users",
                icon: "heroicon-m-users",
                color: StatColor::Gray,
            },
        ]
    }
}
