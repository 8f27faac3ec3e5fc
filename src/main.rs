//! Пример использования библиотеки

use anyhow::Result;
use opencl_matmul::{
    matrix::{compare_results, cpu_matrix_multiply, gpu_matrix_multiply, Matrix},
    opencl::{Platform, CL_DEVICE_TYPE_ALL},
    utils::measure_time,
};

const WIDTH_A: usize = 4;
const HEIGHT_A: usize = 4;
const WIDTH_B: usize = 4;
const HEIGHT_B: usize = 4;

fn print_matrix(label: &str, m: &Matrix) {
    println!("{} ({}x{}):", label, m.height(), m.width());
    for row in 0..m.height() {
        for col in 0..m.width() {
            print!("[{}]", m.get(row, col));
        }
        println!();
    }
    println!();
}

fn main() -> Result<()> {
    println!("Начало выполнения программы умножения матриц на GPU");
    println!("Размеры: A = {}x{}, B = {}x{}\n", HEIGHT_A, WIDTH_A, HEIGHT_B, WIDTH_B);

    // Обнаруженные платформы и устройства
    let platforms = Platform::list()?;
    for platform in &platforms {
        println!("Платформа: {}", platform.name()?);
        for device in platform.devices(CL_DEVICE_TYPE_ALL)? {
            println!("  Устройство: {}", device.name()?);
        }
    }
    println!();

    // Входные данные исходной программы: A = 0..15, B = 1..16
    let a = Matrix::sequential(WIDTH_A, HEIGHT_A, 0.0);
    let b = Matrix::sequential(WIDTH_B, HEIGHT_B, 1.0);

    print_matrix("Входная матрица A", &a);
    print_matrix("Входная матрица B", &b);

    println!("Запуск вычислений на GPU...");
    let (gpu_result, gpu_duration) = measure_time(|| gpu_matrix_multiply(&a, &b));
    let c = gpu_result?;
    println!("GPU вычисления завершены за {:?}\n", gpu_duration);

    print_matrix("Результирующая матрица C (GPU)", &c);

    println!("Запуск вычислений на CPU для верификации...");
    let (cpu_result, cpu_duration) = measure_time(|| cpu_matrix_multiply(&a, &b));
    let cpu_c = cpu_result?;
    println!("CPU вычисления завершены за {:?}\n", cpu_duration);

    if compare_results(&c, &cpu_c, 1e-3) {
        println!("Результаты GPU и CPU совпадают");
    } else {
        println!("Результаты GPU и CPU различаются!");
    }

    println!("\nВремя выполнения на GPU: {:?}", gpu_duration);
    println!("Время выполнения на CPU: {:?}", cpu_duration);
    println!("Программа завершена.");

    Ok(())
}
