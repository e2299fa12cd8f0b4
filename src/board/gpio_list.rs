/*
    Resource Allocation Module

    Wheel driver: INA, INB, PWM (slice channel A)
    Encoder: channel A, channel B
    Stepper: DIR, STEP, EN (active low)
*/

use super::*;

assign_resources! {
    left_wheel: LeftWheelResources {
        INA_PIN: PIN_3,
        INB_PIN: PIN_2,
        PWM_PIN: PIN_4,
        SLICE: PWM_SLICE2,
        ENCODER_A_PIN: PIN_21,
        ENCODER_B_PIN: PIN_20,
    },

    right_wheel: RightWheelResources {
        INA_PIN: PIN_6,
        INB_PIN: PIN_7,
        PWM_PIN: PIN_8,
        SLICE: PWM_SLICE4,
        ENCODER_A_PIN: PIN_11,
        ENCODER_B_PIN: PIN_10,
    },

    stepper: StepperResources {
        DIR_PIN: PIN_27,
        STEP_PIN: PIN_26,
        EN_PIN: PIN_22,
    },

    status: StatusResources {
        LED_PIN: PIN_25,
    },
}

bind_interrupts!(pub struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<peripherals::USB>;
});
