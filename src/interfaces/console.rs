//! Interactive text menu over the reservation system.
//!
//! The console reads from any `BufRead` and writes to any `Write`, so it runs
//! the same against a terminal and against in-memory buffers. Closing the
//! input ends the session cleanly from any prompt.

use crate::application::engine::ReservationSystem;
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::customer::Customer;
use crate::domain::seat::SeatClass;
use crate::error::{ReservationError, Result};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const MAX_SUGGESTIONS: usize = 10;

pub struct Console<'a, R: BufRead, W: Write> {
    system: &'a mut ReservationSystem,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(system: &'a mut ReservationSystem, input: R, output: W) -> Self {
        Self {
            system,
            input,
            output,
        }
    }

    /// Runs the main menu until the user exits or the input is closed.
    pub fn run(&mut self) -> Result<()> {
        match self.main_menu() {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                writeln!(self.output, "\nInput closed. Goodbye!")?;
                Ok(())
            }
            other => other.map_err(ReservationError::from),
        }
    }

    fn main_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n===== Airline Reservation System Menu =====")?;
            writeln!(self.output, "1. Add New Customer")?;
            writeln!(self.output, "2. Book a Seat")?;
            writeln!(self.output, "3. View Flight Details (Seating Map, Available Seats)")?;
            writeln!(self.output, "4. Search Customer")?;
            writeln!(self.output, "5. Cancel Booking")?;
            writeln!(self.output, "6. Swap Seats")?;
            writeln!(self.output, "7. Admin Options")?;
            writeln!(self.output, "0. Exit")?;
            writeln!(self.output, "=========================================")?;

            match self.menu_choice(0, 7)? {
                1 => self.add_customer()?,
                2 => self.book_seat()?,
                3 => self.view_flight_details()?,
                4 => self.search_customer()?,
                5 => self.cancel_booking()?,
                6 => self.swap_seats()?,
                7 => self.admin_menu()?,
                _ => {
                    writeln!(self.output, "Exiting system. Goodbye!")?;
                    return Ok(());
                }
            }
        }
    }

    fn add_customer(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Add New Customer ---")?;
        let mode = self.read_line("Add customer manually (m) or automatically (a)? ")?;
        let customer = match mode.as_str() {
            "a" | "A" => {
                let customer = self.system.add_customer("", 0, Decimal::ZERO, true).clone();
                writeln!(self.output, "Generated Customer:")?;
                write_customer(&mut self.output, &customer)?;
                customer
            }
            "m" | "M" => {
                let name = self.read_non_empty("Enter customer name: ")?;
                let age: u32 = self.read_parsed("Enter customer age: ")?;
                let money: Decimal = self.read_parsed("Enter initial money: ")?;
                self.system
                    .add_customer(&name, i64::from(age), money, false)
                    .clone()
            }
            _ => {
                writeln!(self.output, "Invalid choice. Aborting customer creation.")?;
                return Ok(());
            }
        };
        writeln!(
            self.output,
            "Customer {} with ID {} added successfully.",
            customer.name(),
            customer.person_id()
        )
    }

    fn book_seat(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Book a Seat ---")?;
        if self.system.airplanes().is_empty() {
            return writeln!(self.output, "No flights available to book.");
        }
        if self.system.customers().is_empty() {
            return writeln!(
                self.output,
                "No customers in the system. Please add a customer first."
            );
        }

        let customer_id = self.read_non_empty("Enter Customer ID: ")?;
        let Some(customer) = self.system.customer(&customer_id).cloned() else {
            return writeln!(self.output, "Customer with ID {customer_id} not found.");
        };

        let flight_number = self.choose_flight()?;
        writeln!(self.output, "Selected Flight: {flight_number}")?;
        if let Some(airplane) = self.system.airplane(&flight_number) {
            write!(self.output, "{}", airplane.seating_map())?;
        }

        let seat_id = self.read_non_empty("Enter Seat ID to book (e.g., 1A): ")?;
        let Some(seat) = self
            .system
            .airplane(&flight_number)
            .and_then(|a| a.find_seat(&seat_id))
            .cloned()
        else {
            return writeln!(
                self.output,
                "Seat {seat_id} does not exist on this flight."
            );
        };
        if seat.is_booked() {
            return writeln!(self.output, "Seat {seat_id} is already booked.");
        }

        writeln!(
            self.output,
            "Seat {} ({}) costs {}",
            seat.id(),
            seat.class(),
            seat.price()
        )?;

        if customer.money() < seat.price() {
            writeln!(
                self.output,
                "Insufficient funds. You have {}, seat costs {}.",
                customer.money(),
                seat.price()
            )?;
            return self.print_suggestions(&customer, &flight_number);
        }

        if !self.confirm("Confirm booking? (y/n): ")? {
            return writeln!(self.output, "Booking cancelled by user.");
        }
        match self
            .system
            .create_booking(&customer_id, &flight_number, &seat_id)
        {
            Ok(booking) => writeln!(
                self.output,
                "Booking successful! Booking ID: {}",
                booking.booking_id()
            ),
            Err(e) => writeln!(self.output, "Booking failed: {e}"),
        }
    }

    fn print_suggestions(&mut self, customer: &Customer, flight_number: &str) -> io::Result<()> {
        let suggestions: Vec<String> = self
            .system
            .suggest_seats(
                customer.person_id(),
                flight_number,
                customer.money().value(),
            )
            .map(|seats| {
                seats
                    .into_iter()
                    .take(MAX_SUGGESTIONS)
                    .map(|s| format!("  {} ({}) {}", s.id(), s.class(), s.price()))
                    .collect()
            })
            .unwrap_or_default();
        if suggestions.is_empty() {
            return Ok(());
        }
        writeln!(self.output, "Perhaps one of these seats instead?")?;
        for line in suggestions {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn view_flight_details(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- View Flight Details ---")?;
        if self.system.airplanes().is_empty() {
            return writeln!(self.output, "No flights available to view.");
        }
        let flight_number = self.choose_flight()?;
        let Some(airplane) = self.system.airplane(&flight_number) else {
            return Ok(());
        };

        writeln!(self.output, "\n--- Seating Map for Flight {flight_number} ---")?;
        write!(self.output, "{}", airplane.seating_map())?;
        writeln!(
            self.output,
            "Booked: {}/{}{}",
            airplane.booked_seats_count(),
            airplane.capacity(),
            if airplane.is_full() { " (FULL)" } else { "" }
        )?;
        writeln!(
            self.output,
            "Available Business: {}, Available Economy: {}",
            airplane.available_seats_by_class(SeatClass::Business).len(),
            airplane.available_seats_by_class(SeatClass::Economy).len()
        )
    }

    fn search_customer(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Search Customer ---")?;
        if self.system.customers().is_empty() {
            return writeln!(self.output, "No customers in the system.");
        }
        let customer_id = self.read_non_empty("Enter Customer ID to search: ")?;
        let Some(customer) = self.system.customer(&customer_id) else {
            return writeln!(self.output, "Customer with ID {customer_id} not found.");
        };

        write_customer(&mut self.output, customer)?;
        writeln!(self.output, "Bookings for {}:", customer.name())?;
        let active: Vec<&Booking> = self
            .system
            .bookings_for_customer(&customer_id)
            .into_iter()
            .filter(|b| b.is_confirmed())
            .collect();
        if active.is_empty() {
            return writeln!(self.output, "No active bookings found for this customer.");
        }
        for booking in active {
            write_booking(&mut self.output, booking)?;
        }
        Ok(())
    }

    fn cancel_booking(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Cancel Booking ---")?;
        if self.system.bookings().is_empty() {
            return writeln!(self.output, "No bookings in the system to cancel.");
        }
        let booking_id = self.read_non_empty("Enter Booking ID to cancel: ")?;
        let Some(booking) = self.system.booking(&booking_id).cloned() else {
            return writeln!(self.output, "Booking with ID {booking_id} not found.");
        };
        if booking.status() == BookingStatus::Cancelled {
            return writeln!(self.output, "Booking {booking_id} is already cancelled.");
        }
        write_booking(&mut self.output, &booking)?;

        if !self.confirm("Confirm cancellation? (y/n): ")? {
            return writeln!(self.output, "Cancellation aborted by user.");
        }
        match self.system.cancel_booking(&booking_id) {
            Ok(receipt) => {
                let name = self
                    .system
                    .customer(&receipt.customer_id)
                    .map(|c| c.name().to_string())
                    .unwrap_or(receipt.customer_id);
                writeln!(
                    self.output,
                    "Booking {} cancelled successfully. {} refunded to customer {}.",
                    receipt.booking_id, receipt.refunded, name
                )
            }
            Err(e) => writeln!(self.output, "Cancellation failed: {e}"),
        }
    }

    fn swap_seats(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Swap Seats ---")?;
        if self.system.bookings().len() < 2 {
            return writeln!(
                self.output,
                "Not enough bookings in the system to perform a swap."
            );
        }

        let first_id = self.read_non_empty("Enter Booking ID of the first customer: ")?;
        let Some(first) = self.confirmed_booking(&first_id) else {
            return writeln!(self.output, "First booking ID not found or not confirmed.");
        };
        let second_id = self.read_non_empty("Enter Booking ID of the second customer: ")?;
        let Some(second) = self.confirmed_booking(&second_id) else {
            return writeln!(self.output, "Second booking ID not found or not confirmed.");
        };
        if first.booking_id() == second.booking_id() {
            return writeln!(self.output, "Cannot swap a booking with itself.");
        }
        if first.flight_number() != second.flight_number() {
            writeln!(
                self.output,
                "Seat swaps are currently only supported for bookings on the same flight."
            )?;
            return writeln!(
                self.output,
                "Booking 1 is for flight {}, Booking 2 is for flight {}",
                first.flight_number(),
                second.flight_number()
            );
        }

        writeln!(self.output, "\nBooking 1 Details:")?;
        write_booking(&mut self.output, &first)?;
        writeln!(self.output, "\nBooking 2 Details:")?;
        write_booking(&mut self.output, &second)?;

        if !self.confirm("\nConfirm swap of these two seats? (y/n): ")? {
            return writeln!(self.output, "Seat swap cancelled by user.");
        }
        match self.system.swap_seats(&first_id, &second_id) {
            Ok(receipt) => {
                writeln!(self.output, "\nSeat swap completed successfully!")?;
                writeln!(
                    self.output,
                    "Booking {} now has seat {}.",
                    receipt.first_booking_id, receipt.second_previous_seat
                )?;
                writeln!(
                    self.output,
                    "Booking {} now has seat {}.",
                    receipt.second_booking_id, receipt.first_previous_seat
                )
            }
            Err(e) => writeln!(self.output, "Seat swap failed: {e}"),
        }
    }

    fn admin_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Admin Options ---")?;
        writeln!(self.output, "1. Add New Airplane")?;
        writeln!(self.output, "2. View All Customers")?;
        writeln!(self.output, "3. View All Bookings")?;
        writeln!(self.output, "0. Back to Main Menu")?;

        match self.menu_choice(0, 3)? {
            1 => self.add_airplane(),
            2 => {
                writeln!(self.output, "\n--- All Customers ---")?;
                if self.system.customers().is_empty() {
                    return writeln!(self.output, "No customers in system.");
                }
                for customer in self.system.customers() {
                    write_customer(&mut self.output, customer)?;
                }
                Ok(())
            }
            3 => {
                writeln!(self.output, "\n--- All Bookings ---")?;
                if self.system.bookings().is_empty() {
                    return writeln!(self.output, "No bookings in system.");
                }
                for booking in self.system.bookings() {
                    write_booking(&mut self.output, booking)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn add_airplane(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Add New Airplane ---")?;
        let flight_number = self.read_non_empty("Enter flight number (e.g., FL303): ")?;
        if self.system.airplane(&flight_number).is_some() {
            return writeln!(
                self.output,
                "An airplane with flight number {flight_number} already exists."
            );
        }
        let rows: i64 = self.read_parsed("Enter number of rows: ")?;
        let seats_per_row: i64 = self.read_parsed("Enter seats per row: ")?;
        match self.system.add_airplane(&flight_number, rows, seats_per_row) {
            Ok(_) => writeln!(self.output, "Airplane {flight_number} added successfully."),
            Err(e) => writeln!(self.output, "Could not add airplane: {e}"),
        }
    }

    fn confirmed_booking(&self, booking_id: &str) -> Option<Booking> {
        self.system
            .booking(booking_id)
            .filter(|b| b.is_confirmed())
            .cloned()
    }

    /// Lists flights and returns the flight number picked by position.
    fn choose_flight(&mut self) -> io::Result<String> {
        writeln!(self.output, "\nAvailable Flights:")?;
        let flights: Vec<String> = self
            .system
            .airplanes()
            .iter()
            .map(|a| a.flight_number().to_string())
            .collect();
        for (i, flight) in flights.iter().enumerate() {
            writeln!(self.output, "{}. Flight {}", i + 1, flight)?;
        }
        let choice = self.menu_choice(1, flights.len() as u32)?;
        Ok(flights[choice as usize - 1].clone())
    }

    fn menu_choice(&mut self, min: u32, max: u32) -> io::Result<u32> {
        loop {
            let line = self.read_line("Enter your choice: ")?;
            match line.parse::<u32>() {
                Ok(choice) if (min..=max).contains(&choice) => return Ok(choice),
                _ => writeln!(
                    self.output,
                    "Invalid choice. Please enter a number between {min} and {max}."
                )?,
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.read_line(prompt)?;
        Ok(matches!(answer.as_str(), "y" | "Y"))
    }

    fn read_parsed<T: FromStr>(&mut self, prompt: &str) -> io::Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Invalid input. Please try again.")?,
            }
        }
    }

    fn read_non_empty(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let line = self.read_line(prompt)?;
            if !line.is_empty() {
                return Ok(line);
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }
        Ok(line.trim().to_string())
    }
}

fn write_customer(output: &mut impl Write, customer: &Customer) -> io::Result<()> {
    writeln!(output, "Customer Details:")?;
    writeln!(output, "  ID: {}", customer.person_id())?;
    writeln!(output, "  Name: {}", customer.name())?;
    writeln!(output, "  Age: {}", customer.age())?;
    writeln!(output, "  Money: {}", customer.money())
}

fn write_booking(output: &mut impl Write, booking: &Booking) -> io::Result<()> {
    writeln!(output, "Booking Details:")?;
    writeln!(output, "  Booking ID: {}", booking.booking_id())?;
    writeln!(output, "  Customer ID: {}", booking.customer_id())?;
    writeln!(output, "  Flight Number: {}", booking.flight_number())?;
    writeln!(output, "  Seat ID: {}", booking.seat_id())?;
    writeln!(output, "  Booking Date: {}", booking.booking_date_string())?;
    writeln!(output, "  Status: {}", booking.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine::SystemConfig;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    fn run_script(system: &mut ReservationSystem, script: &str) -> String {
        let mut output = Vec::new();
        Console::new(system, script.as_bytes(), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit_immediately() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        let out = run_script(&mut system, "0\n");
        assert!(out.contains("Airline Reservation System Menu"));
        assert!(out.contains("Exiting system. Goodbye!"));
    }

    #[test]
    fn test_eof_exits_cleanly() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        let out = run_script(&mut system, "2\nCUST0001\n");
        assert!(out.contains("Input closed. Goodbye!"));
        assert!(system.bookings().is_empty());
    }

    #[test]
    fn test_invalid_menu_choice_reprompts() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        let out = run_script(&mut system, "9\nabc\n0\n");
        assert_eq!(
            out.matches("Invalid choice. Please enter a number between 0 and 7.")
                .count(),
            2
        );
    }

    #[test]
    fn test_book_seat_flow() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        let out = run_script(&mut system, "2\nCUST0001\n1\n4A\ny\n0\n");
        assert!(out.contains("Seat 4A (Economy) costs $50.00"));
        assert!(out.contains("Booking successful! Booking ID: BK"));

        assert_eq!(system.bookings().len(), 1);
        assert_eq!(
            system.customer("CUST0001").unwrap().money(),
            Money::new(dec!(1450))
        );
    }

    #[test]
    fn test_book_seat_declined() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        let out = run_script(&mut system, "2\nCUST0001\n1\n10A\nn\n0\n");
        assert!(out.contains("Booking cancelled by user."));
        assert!(system.bookings().is_empty());
    }

    #[test]
    fn test_book_seat_insufficient_funds_suggests() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        system.add_customer("Penny", 22, dec!(60), false);
        let out = run_script(&mut system, "2\nCUST0003\n1\n1A\n0\n");
        assert!(out.contains("Insufficient funds. You have $60.00, seat costs $100.00."));
        assert!(out.contains("Perhaps one of these seats instead?"));
        assert!(out.contains("  4A (Economy) $50.00"));
        assert!(system.bookings().is_empty());
    }

    #[test]
    fn test_cancel_flow() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        let booking = system.create_booking("CUST0002", "FL202", "8C").unwrap();
        let script = format!("5\n{}\ny\n5\n{}\n0\n", booking.booking_id(), booking.booking_id());
        let out = run_script(&mut system, &script);

        assert!(out.contains("refunded to customer Bob The Builder."));
        assert!(out.contains(&format!(
            "Booking {} is already cancelled.",
            booking.booking_id()
        )));
        assert_eq!(
            system.customer("CUST0002").unwrap().money(),
            Money::new(dec!(800))
        );
    }

    #[test]
    fn test_swap_flow() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        let a = system.create_booking("CUST0001", "FL101", "6A").unwrap();
        let b = system.create_booking("CUST0002", "FL101", "6B").unwrap();
        let script = format!("6\n{}\n{}\ny\n0\n", a.booking_id(), b.booking_id());
        let out = run_script(&mut system, &script);

        assert!(out.contains("Seat swap completed successfully!"));
        assert_eq!(system.booking(a.booking_id()).unwrap().seat_id(), "6B");
        assert_eq!(system.booking(b.booking_id()).unwrap().seat_id(), "6A");
    }

    #[test]
    fn test_swap_rejects_cross_flight() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        let a = system.create_booking("CUST0001", "FL101", "6A").unwrap();
        let b = system.create_booking("CUST0002", "FL202", "6B").unwrap();
        let script = format!("6\n{}\n{}\n0\n", a.booking_id(), b.booking_id());
        let out = run_script(&mut system, &script);

        assert!(out.contains("only supported for bookings on the same flight"));
        assert_eq!(system.booking(a.booking_id()).unwrap().seat_id(), "6A");
    }

    #[test]
    fn test_add_customer_manual_and_auto() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        let out = run_script(
            &mut system,
            "1\nm\nCarol Danvers\nforty\n41\n950.25\n1\na\n0\n",
        );
        assert!(out.contains("Invalid input. Please try again."));
        assert!(out.contains("Customer Carol Danvers with ID CUST0003 added successfully."));
        assert!(out.contains("Generated Customer:"));
        assert!(out.contains("with ID CUST0004 added successfully."));

        let carol = system.customer("CUST0003").unwrap();
        assert_eq!(carol.age(), 41);
        assert_eq!(carol.money(), Money::new(dec!(950.25)));
        assert_eq!(system.customers().len(), 4);
    }

    #[test]
    fn test_admin_add_airplane_and_duplicate() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        let out = run_script(&mut system, "7\n1\nFL303\n4\n4\n7\n1\nFL303\n0\n");
        assert!(out.contains("Airplane FL303 added successfully."));
        assert!(out.contains("An airplane with flight number FL303 already exists."));
        assert_eq!(system.airplane("FL303").unwrap().capacity(), 16);
    }

    #[test]
    fn test_view_flight_details() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        system.create_booking("CUST0001", "FL101", "1A").unwrap();
        let out = run_script(&mut system, "3\n1\n0\n");
        assert!(out.contains("--- Seating Map for Flight FL101 ---"));
        assert!(out.contains("1  X B B B B B "));
        assert!(out.contains("Booked: 1/90"));
        assert!(out.contains("Available Business: 17, Available Economy: 72"));
    }

    #[test]
    fn test_search_customer_lists_active_bookings() {
        let mut system = ReservationSystem::new(SystemConfig::default());
        let out = run_script(&mut system, "4\nCUST0002\n0\n");
        assert!(out.contains("No active bookings found for this customer."));

        let booking = system.create_booking("CUST0002", "FL101", "9D").unwrap();
        let out = run_script(&mut system, "4\nCUST0002\n0\n");
        assert!(out.contains(&format!("  Booking ID: {}", booking.booking_id())));
        assert!(out.contains("  Status: Confirmed"));
    }
}
